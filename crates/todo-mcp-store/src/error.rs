//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or statement failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem preparation for the database path failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A todo must have non-empty content.
    #[error("todo content must not be empty")]
    EmptyContent,
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
