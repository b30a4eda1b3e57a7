//! Core error types for hiit-core.
//!
//! Bootstrap anomalies are non-fatal: each is reported to the
//! [`Diagnostics`](crate::diagnostics::Diagnostics) collaborator and either
//! aborts resolution (`Err`) or rides along as a blocker on the resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while resolving untrusted parameters into a run.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The `activity` parameter was present but not a valid Activity record.
    #[error("invalid 'activity' parameter: not valid JSON ({source})")]
    InvalidActivityJson {
        #[source]
        source: serde_json::Error,
    },

    /// The `session` parameter was present but not a valid Session record.
    #[error("invalid 'session' parameter: not valid JSON ({source})")]
    InvalidSessionJson {
        #[source]
        source: serde_json::Error,
    },

    /// A session was provided without the `currentActivityId` parameter.
    #[error("missing 'currentActivityId' parameter")]
    MissingActivityIndex,

    /// The `currentActivityId` parameter does not name an activity.
    #[error("invalid 'currentActivityId' parameter '{raw}': out of bounds for {len} activities")]
    ActivityIndexOutOfBounds { raw: String, len: usize },

    /// Neither an `activity` nor a `session` parameter was provided.
    #[error("no workout provided: expected an 'activity' or 'session' parameter")]
    NoWorkoutProvided,
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("could not determine the configuration directory")]
    NoConfigDir,
}

/// Result type alias for ExecutionError.
pub type Result<T, E = ExecutionError> = std::result::Result<T, E>;
