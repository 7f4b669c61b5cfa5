//! Core error types for attention-core.
//!
//! The stream engine itself is total and never fails. Errors only arise at
//! the storage boundary: loading and saving snapshots and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for attention-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Snapshot-related errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Snapshot-specific errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Failed to read or parse a snapshot file
    #[error("Failed to load snapshot from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write a snapshot file
    #[error("Failed to save snapshot to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// No record with this key exists in the snapshot
    #[error("No record '{id}' in {collection}")]
    RecordNotFound { collection: String, id: String },

    /// Collection name is not one of projects/groceries/purchases/goals
    #[error("Unknown source collection: {0}")]
    UnknownCollection(String),
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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
