// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("New location '{record}' is missing required field '{field}'")]
    MissingField { record: String, field: &'static str },

    #[error("Blank name in {list} entry #{index}")]
    EmptyName { list: &'static str, index: usize },

    #[error("Merge entry #{index} merges '{name}' into itself")]
    SelfMerge { index: usize, name: String },

    #[error("Control character in '{field}' of {list} entry #{index}")]
    ControlCharacter {
        list: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("Cascade step '{table}' is listed after its parent '{parent}'")]
    CascadeOrder { table: &'static str, parent: &'static str },

    #[error("Cascade step '{table}' names unknown parent '{parent}'")]
    UnknownParent { table: &'static str, parent: &'static str },

    #[error("Invalid catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    /// True for errors caused by the catalog content rather than the environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::EmptyName { .. }
                | Self::SelfMerge { .. }
                | Self::ControlCharacter { .. }
                | Self::Catalog { .. }
        )
    }
}
