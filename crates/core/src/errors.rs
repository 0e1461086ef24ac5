//! Core error types for 2ndBrain.
//!
//! The store never surfaces these to views: persistence failures are logged
//! and swallowed at the `Store` boundary. They exist so that storage backends
//! and loaders can report what went wrong in a backend-agnostic way.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the state layer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to (de)serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Backend-agnostic error type for durable storage operations.
///
/// Backends (SQLite, in-memory, ...) convert their native errors into this
/// shape so the store can log them uniformly.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open or connect to the backing store.
    #[error("Failed to open storage: {0}")]
    ConnectionFailed(String),

    /// Reading a document failed.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Writing a document failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Schema setup failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Validation errors for user- or model-supplied input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid amount for {0}")]
    InvalidAmount(String),

    #[error("{0}")]
    InvalidInput(String),
}
