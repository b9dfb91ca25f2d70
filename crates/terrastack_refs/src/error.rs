//! Error types for the reference graph.

use thiserror::Error;

/// Result type alias for reference graph operations.
pub type RefResult<T> = Result<T, RefError>;

/// Errors raised while building or updating a reference graph.
///
/// A reference that cannot be followed is not an error; it stays unresolved
/// in the graph.
#[derive(Error, Debug)]
pub enum RefError {
    #[error("Stack definition is missing required field: {0}")]
    MissingField(String),

    #[error("Member not found in stack: {0}")]
    MemberNotFound(String),

    #[error("Config error: {0}")]
    Config(#[from] terrastack_config::ConfigError),
}
