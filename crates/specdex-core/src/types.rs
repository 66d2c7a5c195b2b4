#![forbid(unsafe_code)]

//! Element types and type sets.
//!
//! A specie carries zero to two element types. The type filter dimension is
//! a set over the twelve types, represented as bitflags so membership tests
//! and intersection stay branch-free.

use bitflags::bitflags;
use std::fmt;

/// One of the twelve catalog element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementType {
    Neutral,
    Fire,
    Water,
    Nature,
    Electric,
    Earth,
    Mental,
    Wind,
    Digital,
    Melee,
    Crystal,
    Toxic,
}

impl ElementType {
    /// All element types, in canonical (wire) order.
    pub const ALL: [ElementType; 12] = [
        Self::Neutral,
        Self::Fire,
        Self::Water,
        Self::Nature,
        Self::Electric,
        Self::Earth,
        Self::Mental,
        Self::Wind,
        Self::Digital,
        Self::Melee,
        Self::Crystal,
        Self::Toxic,
    ];

    /// Lowercase wire token for URL parameters and catalog files.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Nature => "nature",
            Self::Electric => "electric",
            Self::Earth => "earth",
            Self::Mental => "mental",
            Self::Wind => "wind",
            Self::Digital => "digital",
            Self::Melee => "melee",
            Self::Crystal => "crystal",
            Self::Toxic => "toxic",
        }
    }

    /// Parse a wire token. Unknown tokens yield `None`; callers drop them
    /// rather than erroring (malformed input is normalized, not rejected).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.token() == token)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

bitflags! {
    /// A set of element types (the type filter dimension).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeSet: u16 {
        const NEUTRAL  = 1 << 0;
        const FIRE     = 1 << 1;
        const WATER    = 1 << 2;
        const NATURE   = 1 << 3;
        const ELECTRIC = 1 << 4;
        const EARTH    = 1 << 5;
        const MENTAL   = 1 << 6;
        const WIND     = 1 << 7;
        const DIGITAL  = 1 << 8;
        const MELEE    = 1 << 9;
        const CRYSTAL  = 1 << 10;
        const TOXIC    = 1 << 11;
    }
}

impl TypeSet {
    /// The single-flag set for one element type.
    #[must_use]
    pub const fn of(ty: ElementType) -> Self {
        match ty {
            ElementType::Neutral => Self::NEUTRAL,
            ElementType::Fire => Self::FIRE,
            ElementType::Water => Self::WATER,
            ElementType::Nature => Self::NATURE,
            ElementType::Electric => Self::ELECTRIC,
            ElementType::Earth => Self::EARTH,
            ElementType::Mental => Self::MENTAL,
            ElementType::Wind => Self::WIND,
            ElementType::Digital => Self::DIGITAL,
            ElementType::Melee => Self::MELEE,
            ElementType::Crystal => Self::CRYSTAL,
            ElementType::Toxic => Self::TOXIC,
        }
    }

    /// Whether the set contains the given element type.
    #[must_use]
    pub fn has(self, ty: ElementType) -> bool {
        self.contains(Self::of(ty))
    }

    /// Iterate the member types in canonical order.
    pub fn types(self) -> impl Iterator<Item = ElementType> {
        ElementType::ALL.into_iter().filter(move |t| self.has(*t))
    }
}

impl From<ElementType> for TypeSet {
    fn from(ty: ElementType) -> Self {
        Self::of(ty)
    }
}

impl FromIterator<ElementType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = ElementType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, t| acc | Self::of(t))
    }
}
