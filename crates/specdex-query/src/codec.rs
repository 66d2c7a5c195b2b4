#![forbid(unsafe_code)]

//! URL query-string codec for [`QueryState`].
//!
//! Decoding is total: it never fails, defaulting unparseable or absent
//! fields. Encoding is minimal: default-valued fields produce no parameter
//! at all, so the default state encodes to the empty string and detail
//! links stay as short as the state allows.
//!
//! # Parameters
//!
//! | key     | value                                  |
//! |---------|----------------------------------------|
//! | `q`     | search text, percent-escaped           |
//! | `sort`  | sort-key token (unknown ⇒ `relevance`) |
//! | `types` | comma-joined element-type tokens       |
//!
//! Unknown keys and unknown type tokens are dropped silently; malformed
//! percent escapes pass through as literal text rather than erroring.

use specdex_core::{ElementType, QueryState, SortKey, TypeSet};
use std::fmt::Write as _;
use tracing::trace;

/// Search text parameter.
const PARAM_SEARCH: &str = "q";
/// Sort key parameter.
const PARAM_SORT: &str = "sort";
/// Type filter parameter (one parameter for the one filter dimension).
const PARAM_TYPES: &str = "types";

// ─────────────────────────────────────────────────────────────────────────────
// Percent escaping
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a byte passes through a query value unescaped (RFC 3986
/// unreserved set).
const fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}

/// Percent-escape a query value.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            // Always uses uppercase hex so encoding is deterministic.
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// Percent-decode a query value. `+` decodes to space; malformed escapes
/// are kept literally (totality over strictness).
fn unescape_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (hex_digit(bytes.get(i + 1)), hex_digit(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: Option<&u8>) -> Option<u8> {
    (*b? as char).to_digit(16).map(|d| d as u8)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode / encode
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a raw query string (with or without a leading `?`) into a
/// [`QueryState`]. Total: any input yields a valid state.
#[must_use]
pub fn decode(raw: &str) -> QueryState {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut state = QueryState::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = unescape_value(value);
        match key {
            PARAM_SEARCH => state.search = value,
            PARAM_SORT => state.sort = SortKey::from_token(&value).unwrap_or_default(),
            PARAM_TYPES => {
                state.filters.types = value
                    .split(',')
                    .filter_map(ElementType::from_token)
                    .collect();
            }
            _ => trace!(key, "ignoring unknown query parameter"),
        }
    }
    state
}

/// Serialize a [`QueryState`] to its minimal query string (no leading `?`).
/// The default state encodes to `""`.
#[must_use]
pub fn encode(state: &QueryState) -> String {
    let mut params: Vec<String> = Vec::new();
    if !state.search.is_empty() {
        params.push(format!("{PARAM_SEARCH}={}", escape_value(&state.search)));
    }
    if state.sort != SortKey::Relevance {
        params.push(format!("{PARAM_SORT}={}", state.sort.token()));
    }
    if !state.filters.types.is_empty() {
        let tokens: Vec<&str> = state.filters.types.types().map(ElementType::token).collect();
        params.push(format!("{PARAM_TYPES}={}", tokens.join(",")));
    }
    params.join("&")
}

/// The encode of the current state, prefixed with `?` when non-empty.
///
/// Appending this to a per-entry path yields a detail link that preserves
/// the list's filter/sort context when navigated to and back.
#[must_use]
pub fn minimal_query_url(state: &QueryState) -> String {
    let encoded = encode(state);
    if encoded.is_empty() {
        encoded
    } else {
        format!("?{encoded}")
    }
}
