//! Error types
//!
//! One enum per failure domain. Only `ProgressError` can abort a completion;
//! submission and storage errors are absorbed by the completion flow.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Input validation and store invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("{field} is out of range (got {value})")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("stale update: built against revision {expected}, store is at revision {found}")]
    StaleUpdate { expected: u64, found: u64 },

    #[error("total XP may not decrease (from {current} to {proposed})")]
    XpDecrease { current: u64, proposed: u64 },

    #[error("update is for profile {update}, store holds {store}")]
    ProfileMismatch { update: String, store: String },

    #[error("completion worker is no longer running")]
    EngineStopped,
}

/// Why a performance submission produced no usable server result
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("server submission disabled (offline mode)")]
    Offline,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("server returned status {0}")]
    Status(u16),
}

/// Profile persistence failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse profile: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("profile version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("invalid user id {0:?}")]
    InvalidUserId(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}
