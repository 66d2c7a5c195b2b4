#![forbid(unsafe_code)]

//! Query state: the normalized representation of search/sort/filter intent.
//!
//! `QueryState` is created from the initial address on mount, mutated only
//! by user input, and every mutation re-derives the rendered sequence and
//! the address. Unknown sort tokens from untrusted input fall back to
//! [`SortKey::Relevance`]; decoding is total and never surfaces an error.

use crate::types::TypeSet;
use std::fmt;

/// A sortable base stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    Hp,
    Sta,
    Spd,
    Atk,
    Def,
    SpAtk,
    SpDef,
}

impl StatKey {
    /// All stat keys, in wire order.
    pub const ALL: [StatKey; 7] = [
        Self::Hp,
        Self::Sta,
        Self::Spd,
        Self::Atk,
        Self::Def,
        Self::SpAtk,
        Self::SpDef,
    ];

    /// Lowercase wire token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Sta => "sta",
            Self::Spd => "spd",
            Self::Atk => "atk",
            Self::Def => "def",
            Self::SpAtk => "spatk",
            Self::SpDef => "spdef",
        }
    }

    /// Short uppercase label for row badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Sta => "STA",
            Self::Spd => "SPD",
            Self::Atk => "ATK",
            Self::Def => "DEF",
            Self::SpAtk => "SPATK",
            Self::SpDef => "SPDEF",
        }
    }
}

/// The sort dimension of a query.
///
/// Always a member of the enumerated set: parsing clamps unknown tokens to
/// the default rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Match quality when a search is active, catalog order otherwise.
    #[default]
    Relevance,
    /// Lexicographic ascending on display name.
    Name,
    /// Ascending on catalog number.
    Number,
    /// Descending on one base stat, ties by catalog number.
    Stat(StatKey),
}

impl SortKey {
    /// Lowercase wire token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Name => "name",
            Self::Number => "number",
            Self::Stat(key) => key.token(),
        }
    }

    /// Parse a wire token. `None` for unknown tokens; decode paths clamp
    /// that to [`SortKey::Relevance`].
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "relevance" => Some(Self::Relevance),
            "name" => Some(Self::Name),
            "number" => Some(Self::Number),
            _ => StatKey::ALL
                .iter()
                .copied()
                .find(|k| k.token() == token)
                .map(Self::Stat),
        }
    }

    /// The stat behind this key, when it sorts by one.
    #[must_use]
    pub const fn stat(self) -> Option<StatKey> {
        match self {
            Self::Stat(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Active filters, one field per filter dimension.
///
/// A dimension with an empty value is inactive (keeps every entry) and
/// encodes to no URL parameter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSet {
    /// Type membership: keep entries whose type set intersects this one.
    pub types: TypeSet,
}

impl FilterSet {
    /// No active filters.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            types: TypeSet::empty(),
        }
    }

    /// Whether every dimension is inactive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The full query intent: search text, sort key, filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    /// Free-form search text; empty means "no search".
    pub search: String,
    /// Sort dimension.
    pub sort: SortKey,
    /// Active filters.
    pub filters: FilterSet,
}

impl QueryState {
    /// The default query (empty search, relevance sort, no filters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text (builder).
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the sort key (builder).
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Set the filters (builder).
    #[must_use]
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Whether this is the default state (encodes to the empty string).
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.sort == SortKey::Relevance && self.filters.is_empty()
    }
}
