//! Error types for the store ports and backends

use std::fmt;
use thiserror::Error;

use crate::error::ErrorCode;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflict (duplicate name, unresolved merge, stale copy)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Operation not implemented by this store
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Storage backend unavailable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error wrapper
    #[error("Storage error: {0}")]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    /// Create a serialization error
    pub fn serialization<E: fmt::Display>(err: E) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Create a not found error
    pub fn not_found<E: fmt::Display>(item: E) -> Self {
        Self::NotFound(item.to_string())
    }

    /// Create a conflict error
    pub fn conflict<E: fmt::Display>(msg: E) -> Self {
        Self::Conflict(msg.to_string())
    }

    /// Create an unsupported-operation error
    pub fn unsupported<E: fmt::Display>(msg: E) -> Self {
        Self::Unsupported(msg.to_string())
    }

    /// Create an unavailable error
    pub fn unavailable<E: fmt::Display>(msg: E) -> Self {
        Self::Unavailable(msg.to_string())
    }

    /// Create a configuration error
    pub fn configuration<E: fmt::Display>(msg: E) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Check if this is a retryable error
    ///
    /// Retrying is the adapter's or the caller's decision; the versioning
    /// managers never retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Io(_) => ErrorCode::STORAGE_IO_ERROR,
            Self::Serialization(_) => ErrorCode::STORAGE_SERIALIZATION_ERROR,
            Self::NotFound(_) => ErrorCode::STORAGE_NOT_FOUND,
            Self::Conflict(_) => ErrorCode::STORAGE_ALREADY_EXISTS,
            Self::Unsupported(_) => ErrorCode::STORAGE_UNSUPPORTED,
            Self::Unavailable(_) => ErrorCode::STORAGE_TEMPORARY,
            Self::Configuration(_) => ErrorCode::STORAGE_BACKEND_ERROR,
            Self::Other(_) => ErrorCode::STORAGE_GENERIC,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}
