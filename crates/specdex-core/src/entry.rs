#![forbid(unsafe_code)]

//! Catalog entry records.
//!
//! A [`Specie`] is supplied by an external fetch layer and is read-only to
//! the core for the duration of a render cycle. The unique `name` doubles
//! as the entry id; `number` is the display/catalog number.

use crate::query::StatKey;
use crate::types::ElementType;
use smallvec::SmallVec;

/// The seven base stats carried by every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub hp: u32,
    pub sta: u32,
    pub spd: u32,
    pub atk: u32,
    pub def: u32,
    pub spatk: u32,
    pub spdef: u32,
}

impl Stats {
    /// Numeric accessor keyed by [`StatKey`] (the sort pipeline's view).
    #[must_use]
    pub const fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Sta => self.sta,
            StatKey::Spd => self.spd,
            StatKey::Atk => self.atk,
            StatKey::Def => self.def,
            StatKey::SpAtk => self.spatk,
            StatKey::SpDef => self.spdef,
        }
    }
}

/// One catalog entry, rendered as a list row.
///
/// Immutable to the core; identified by its unique `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Specie {
    /// Unique name (entry id).
    pub name: String,
    /// Catalog number (display order when no sort intent is active).
    pub number: u32,
    /// Zero to two element types.
    #[cfg_attr(feature = "serde", serde(default))]
    pub types: SmallVec<[ElementType; 2]>,
    /// Base stats used as sort accessors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Stats,
}

impl Specie {
    /// Build an entry with the given identity and no types/stats.
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
            types: SmallVec::new(),
            stats: Stats::default(),
        }
    }

    /// Set the element types (builder).
    #[must_use]
    pub fn with_types(mut self, types: impl IntoIterator<Item = ElementType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Set the stats block (builder).
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    /// Whether the entry carries the given element type.
    #[must_use]
    pub fn has_type(&self, ty: ElementType) -> bool {
        self.types.contains(&ty)
    }
}
