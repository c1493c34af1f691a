// src/catalog/mod.rs
//! Change catalog input: deletes, merges, renames and new rows.

pub mod normalize;
pub mod types;

pub use types::{Address, Catalog, LocationRecord, NamePair, NewRow, PostalCode};

use crate::error::{PlanError, Result};
use std::fs;
use std::path::Path;

impl Catalog {
    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file can't be read or isn't a valid catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PlanError::Io {
            source,
            path: path.to_path_buf(),
        })?;

        Self::parse(&content, path)
    }

    /// Parses catalog TOML. `origin` is only used for error messages.
    ///
    /// # Errors
    /// Returns error if the TOML doesn't describe a catalog.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| PlanError::Catalog {
            path: origin.to_path_buf(),
            source,
        })
    }
}
