#![forbid(unsafe_code)]

//! Catalog loading.
//!
//! The core treats entries as an externally supplied, already-resolved
//! snapshot; this module is that supplier. Records come from a JSON file
//! or from the embedded sample catalog.

use specdex_core::Specie;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// The built-in sample catalog.
pub const SAMPLE_CATALOG: &str = include_str!("../data/species.json");

/// Errors that can occur while loading a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// I/O error reading the catalog file.
    Io(io::Error),
    /// The file is not a valid species list.
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "I/O error: {e}"),
            CatalogError::Parse(e) => write!(f, "catalog parse error: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Load species from `path`, or the embedded sample when `None`.
pub fn load(path: Option<&Path>) -> CatalogResult<Vec<Specie>> {
    let species = match path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => serde_json::from_str(SAMPLE_CATALOG)?,
    };
    Ok(species)
}
