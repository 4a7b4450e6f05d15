//! Storage-specific error types for key-value store operations.
//!
//! This module provides error types that wrap io and JSON errors and convert
//! them to the storage-agnostic error types defined in `obra_core`.

use obra_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors.
///
/// These errors are internal to the storage layer and are converted to
/// `obra_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Store file could not be accessed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock was poisoned by a panicking writer")]
    LockPoisoned,

    #[error("Writer actor is not running")]
    WriterClosed,

    #[error("Writer returned an unexpected result type")]
    UnexpectedResult,
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        let message = err.to_string();
        match err {
            StorageError::Io(_) => Error::Database(DatabaseError::ConnectionFailed(message)),
            StorageError::Serialization(_) => Error::Database(DatabaseError::QueryFailed(message)),
            StorageError::LockPoisoned => Error::Database(DatabaseError::Internal(message)),
            StorageError::WriterClosed => {
                Error::Database(DatabaseError::TransactionFailed(message))
            }
            StorageError::UnexpectedResult => Error::Unexpected(message),
        }
    }
}

/// Extension trait for converting io and JSON results to core results.
///
/// `obra_core` already maps these error types for its own callers; inside the
/// store they mean a broken backing file, so they go through `StorageError`.
pub trait IntoCore<T> {
    fn into_core(self) -> obra_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, serde_json::Error> {
    fn into_core(self) -> obra_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, std::io::Error> {
    fn into_core(self) -> obra_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
