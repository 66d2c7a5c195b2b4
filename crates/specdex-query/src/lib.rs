#![forbid(unsafe_code)]

//! Query processing for the specdex catalog.
//!
//! Three pieces, all pure:
//!
//! - [`codec`] - the lossy-round-trip URL query-string codec
//!   (`decode(encode(s)) == s`, default state encodes to `""`).
//! - [`matcher`] - case-insensitive name matching with match-quality
//!   classification (prefix / substring / fuzzy subsequence).
//! - [`pipeline`] - `(entries, query) → ordered sequence`: filter, then a
//!   stable sort by the query's sort key.
//!
//! Nothing here holds state between calls; the composition root re-runs the
//! pipeline on query changes only, never on scroll ticks.

pub mod codec;
pub mod matcher;
pub mod pipeline;

pub use codec::{decode, encode, minimal_query_url};
pub use matcher::NameMatch;
pub use pipeline::process;
