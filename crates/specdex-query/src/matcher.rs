#![forbid(unsafe_code)]

//! Name matching with match-quality classification.
//!
//! Classifies a search query against an entry name for the filter step and
//! the relevance sort. Matching is case-insensitive; callers pass
//! pre-lowercased strings so the per-entry cost in the pipeline's hot loop
//! is a scan, not an allocation.
//!
//! # Invariants
//!
//! 1. Determinism: same `(query, name)` → identical result.
//! 2. Ranking order: prefix < substring (by position) < fuzzy (by
//!    position); [`NameMatch::sort_key`] encodes exactly that.

/// A successful match of a query against a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// The name starts with the query (exact matches included).
    Prefix,
    /// The query occurs as a contiguous substring at `position > 0`.
    Substring {
        /// Byte offset of the first occurrence.
        position: usize,
    },
    /// Every query char appears in the name, in order, with gaps.
    Fuzzy {
        /// Byte offset of the first matched char.
        position: usize,
    },
}

impl NameMatch {
    /// Classify `query_lower` against `name_lower`; `None` when the name
    /// does not match at all.
    ///
    /// Both arguments must already be lowercased.
    #[must_use]
    pub fn detect(query_lower: &str, name_lower: &str) -> Option<Self> {
        if name_lower.starts_with(query_lower) {
            return Some(Self::Prefix);
        }
        if let Some(position) = name_lower.find(query_lower) {
            return Some(Self::Substring { position });
        }
        Self::subsequence(query_lower, name_lower)
    }

    /// In-order character containment (the fuzzy-token fallback).
    fn subsequence(query: &str, name: &str) -> Option<Self> {
        let mut chars = query.chars().peekable();
        let mut first = None;
        for (i, c) in name.char_indices() {
            match chars.peek() {
                Some(&qc) if qc == c => {
                    first.get_or_insert(i);
                    chars.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        if chars.peek().is_none() {
            Some(Self::Fuzzy {
                position: first.unwrap_or(0),
            })
        } else {
            None
        }
    }

    /// Ranking key: lower sorts earlier under relevance.
    #[must_use]
    pub fn sort_key(self) -> (u8, usize) {
        match self {
            Self::Prefix => (0, 0),
            Self::Substring { position } => (1, position),
            Self::Fuzzy { position } => (2, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_beats_substring_beats_fuzzy() {
        let prefix = NameMatch::detect("pig", "pigepic").unwrap();
        let substring = NameMatch::detect("pig", "grumpig").unwrap();
        let fuzzy = NameMatch::detect("pgc", "pigepic").unwrap();
        assert_eq!(prefix, NameMatch::Prefix);
        assert_eq!(substring, NameMatch::Substring { position: 4 });
        assert_eq!(fuzzy, NameMatch::Fuzzy { position: 0 });
        assert!(prefix.sort_key() < substring.sort_key());
        assert!(substring.sort_key() < fuzzy.sort_key());
    }

    #[test]
    fn exact_match_is_prefix() {
        assert_eq!(NameMatch::detect("oree", "oree"), Some(NameMatch::Prefix));
    }

    #[test]
    fn earlier_substring_ranks_higher() {
        let a = NameMatch::detect("ra", "brawn").unwrap();
        let b = NameMatch::detect("ra", "cobra").unwrap();
        assert!(a.sort_key() < b.sort_key());
    }

    #[test]
    fn no_match_when_chars_out_of_order() {
        assert_eq!(NameMatch::detect("ba", "ab"), None);
        assert_eq!(NameMatch::detect("xyz", "oree"), None);
    }

    #[test]
    fn fuzzy_records_first_matched_position() {
        // "mn" in "amphing": no contiguous "mn"; m at 1... n at 5.
        let m = NameMatch::detect("mn", "amphing").unwrap();
        assert_eq!(m, NameMatch::Fuzzy { position: 1 });
    }

    #[test]
    fn empty_query_is_prefix_of_everything() {
        assert_eq!(NameMatch::detect("", "anything"), Some(NameMatch::Prefix));
    }

    #[test]
    fn multibyte_names_match_by_char() {
        assert_eq!(NameMatch::detect("ピグ", "ピグエピック"), Some(NameMatch::Prefix));
        assert!(NameMatch::detect("ピク", "ピグエピック").is_some());
    }
}
