// src/config/mod.rs
pub mod types;

pub use self::types::{
    AliasConfig, Config, ConflictPolicy, GuardConfig, GuardMode, InsertConfig, OutputConfig,
};

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_PATH: &str = "locshift.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `locshift.toml` (or `path`). A missing file means defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or(Path::new(DEFAULT_PATH));

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = Self::parse_toml(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns error if the TOML doesn't describe a config.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// # Errors
    /// Returns error on an empty alias delimiter or output path.
    pub fn validate(&self) -> Result<()> {
        if self.aliases.delimiter.is_empty() {
            bail!("aliases.delimiter must not be empty");
        }
        if self.output.path.trim().is_empty() {
            bail!("output.path must not be empty");
        }
        Ok(())
    }

    /// Saves the configuration to `path` (default `locshift.toml`).
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = path.unwrap_or(Path::new(DEFAULT_PATH));
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}
