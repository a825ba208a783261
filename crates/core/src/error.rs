//! Error types for the wavefield core.

use thiserror::Error;

/// Errors produced by simulator operations.
#[derive(Debug, Error)]
pub enum OceanError {
    /// A configuration field failed validation. The configuration is
    /// rejected as a whole and any previously published maps stay valid.
    #[error("invalid configuration: {field} {reason}")]
    ConfigInvalid { field: &'static str, reason: String },

    /// Two grids (or a grid and a plan) had different side lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A compute backend could not run a kernel or serve a buffer.
    #[error("compute backend: {0}")]
    Backend(String),

    /// A file could not be written or read.
    #[error("i/o error: {0}")]
    Io(String),
}

impl OceanError {
    /// Shorthand for [`OceanError::ConfigInvalid`].
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        OceanError::ConfigInvalid {
            field,
            reason: reason.into(),
        }
    }

    /// True for the one error kind a host is expected to surface to users.
    pub fn is_config_invalid(&self) -> bool {
        matches!(self, OceanError::ConfigInvalid { .. })
    }
}
