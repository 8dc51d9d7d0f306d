//! Core error types for luna-core.
//!
//! This module defines the error hierarchy using thiserror. Most of the
//! tracker is total over well-formed input; errors surface at the edges
//! (date parsing from user input, configuration, snapshot files, insight
//! providers).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for luna-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Date parsing errors
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Insight provider errors
    #[error("Insight error: {0}")]
    Insight(#[from] InsightError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Date parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input was empty or whitespace
    #[error("empty date string")]
    Empty,

    /// Input was not a valid `YYYY-MM-DD` calendar date
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    Invalid { input: String },

    /// Input was not a valid `YYYY-MM` month
    #[error("invalid month '{input}': expected YYYY-MM")]
    InvalidMonth { input: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Snapshot persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to write the snapshot file
    #[error("Failed to write snapshot to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the snapshot
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Insight provider errors. These never reach the user; the fallback chain
/// swaps in a static phrase instead.
#[derive(Error, Debug)]
pub enum InsightError {
    /// No API key available
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    /// Remote generation disabled by configuration
    #[error("remote insights are disabled")]
    Disabled,

    /// Network or HTTP client failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("insight service returned HTTP {status}")]
    Status { status: u16 },

    /// Response carried no text
    #[error("insight service returned no text")]
    EmptyResponse,

    /// Async runtime could not be built
    #[error("runtime unavailable: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
