// src/exit.rs
//! Standardized process exit codes for `locshift`.
//!
//! Provides a stable contract for migration scripts and CI.

use crate::error::PlanError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LocshiftExit {
    /// Plan written (or check passed).
    Success = 0,
    /// Generic error (e.g. IO, config).
    Error = 1,
    /// Catalog could not be planned (missing field, blank name, bad TOML).
    InvalidInput = 2,
    /// `check` found problems in the catalog.
    CheckFailed = 3,
}

impl LocshiftExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for LocshiftExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl LocshiftExit {
    /// Exit code for a failed command: bad catalog input vs. anything else.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<PlanError>() {
            Some(e) if e.is_input_error() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}
