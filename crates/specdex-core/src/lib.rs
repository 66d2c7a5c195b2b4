#![forbid(unsafe_code)]

//! Core data model for the specdex catalog.
//!
//! This crate holds the read-only catalog record ([`Specie`]), the element
//! type system ([`ElementType`], [`TypeSet`]), and the normalized
//! search/sort/filter intent ([`QueryState`], [`SortKey`], [`FilterSet`]).
//!
//! Everything here is plain data: no I/O, no rendering, no interior
//! mutability. The query pipeline and the list engine consume these types
//! as immutable snapshots.

pub mod entry;
pub mod query;
pub mod types;

pub use entry::{Specie, Stats};
pub use query::{FilterSet, QueryState, SortKey, StatKey};
pub use types::{ElementType, TypeSet};
