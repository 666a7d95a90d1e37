//! Core error types for tabata-core.
//!
//! Every operation that can be refused reports it through these types rather
//! than panicking: the presentation layer is expected to gate its buttons by
//! phase, but the engine never trusts it to.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::Phase;

/// Core error type for tabata-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An operation was invoked in a phase that does not allow it.
    /// The engine state is left untouched.
    #[error("cannot {operation} while {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    /// The session configuration violates its invariants.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// The session driver task is gone.
    #[error("session driver is no longer running")]
    DriverClosed,
}

impl CoreError {
    /// True for the state-conflict rejections that callers absorb as no-ops.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, CoreError::InvalidState { .. })
    }
}

/// Reasons a [`SessionConfig`](crate::timer::SessionConfig) is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("cycles must be at least 1 (got {0})")]
    ZeroCycles(u32),

    #[error("sets must be at least 1 (got {0})")]
    ZeroSets(u32),

    /// Infinite sessions need at least one phase that actually counts down.
    #[error("infinite cycles need a non-zero work or rest duration")]
    EmptyInfiniteCycle,

    /// Planning only makes sense for sessions that end on their own.
    #[error("infinite sessions have no finite plan")]
    Unbounded,
}

/// Settings-file errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid settings value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The home/config directory could not be determined or created
    #[error("Config directory unavailable: {0}")]
    NoConfigDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
