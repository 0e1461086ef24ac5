//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap Diesel-specific errors and convert
//! them to the database-agnostic error types defined in `secondbrain_core`.

use diesel::result::Error as DieselError;
use secondbrain_core::errors::{Error, StorageError as CoreStorageError};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `secondbrain_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        let core = match err {
            StorageError::ConnectionFailed(e) => CoreStorageError::ConnectionFailed(e.to_string()),
            StorageError::PoolError(e) => CoreStorageError::ConnectionFailed(e.to_string()),
            StorageError::QueryFailed(e) => CoreStorageError::ReadFailed(e.to_string()),
            StorageError::MigrationFailed(e) => CoreStorageError::MigrationFailed(e),
            StorageError::Io(e) => CoreStorageError::Internal(e.to_string()),
        };
        Error::Storage(core)
    }
}

/// Extension trait for converting Diesel write results to core results.
///
/// Reads go through `From<StorageError>`; writes are tagged so the log says
/// which direction failed.
pub trait IntoCoreWrite<T> {
    fn into_core_write(self) -> secondbrain_core::Result<T>;
}

impl<T> IntoCoreWrite<T> for std::result::Result<T, DieselError> {
    fn into_core_write(self) -> secondbrain_core::Result<T> {
        self.map_err(|e| Error::Storage(CoreStorageError::WriteFailed(e.to_string())))
    }
}
