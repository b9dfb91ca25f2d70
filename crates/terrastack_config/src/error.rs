//! Error types for the config module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or saving stack fixtures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Stack fixture not found at path: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported fixture format (expected .json, .yaml or .yml): {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
