//! Error types for the versioning engine
//!
//! Every failure a caller can observe is a [`VersioningError`]. The variants
//! map one-to-one onto the kinds a caller is expected to branch on; the
//! transport layer above this crate decides how to present them.

use std::fmt;
use thiserror::Error;

use crate::storage::StorageError;

/// Result type for versioning operations
pub type VersioningResult<T> = Result<T, VersioningError>;

/// Error code registry
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Session errors
/// - 3000-3999: Storage errors
/// - 7000-7999: Validation errors
/// - 8000-8999: Versioning engine errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;

    // Session errors (2000-2999)
    pub const SESSION_GENERIC: u16 = 2000;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_NOT_FOUND: u16 = 3004;
    pub const STORAGE_ALREADY_EXISTS: u16 = 3005;
    pub const STORAGE_TEMPORARY: u16 = 3009;
    pub const STORAGE_BACKEND_ERROR: u16 = 3010;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;
    pub const STORAGE_UNSUPPORTED: u16 = 3013;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;

    // Versioning engine errors (8000-8999)
    pub const NOT_FOUND: u16 = 8001;
    pub const INTERNAL_CONSISTENCY: u16 = 8002;
    pub const UNSUPPORTED_OPERATION: u16 = 8003;
}

/// Coarse error category, for callers that branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InternalConsistency,
    Unsupported,
    Session,
    Config,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InternalConsistency => "internal_consistency",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::Session => "session",
            ErrorKind::Config => "config",
            ErrorKind::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Versioning engine errors
#[derive(Error, Debug)]
pub enum VersioningError {
    /// A caller-supplied value or requested transition broke an invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced item or version does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store broke its own contract, e.g. a version is still missing
    /// right after a successful sync
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    /// The operation is not modelled
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// The caller's session context is incomplete
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store failure, passed through unchanged
    #[error(transparent)]
    Storage(StorageError),
}

impl VersioningError {
    pub fn validation<E: fmt::Display>(msg: E) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn not_found<E: fmt::Display>(what: E) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn internal_consistency<E: fmt::Display>(msg: E) -> Self {
        Self::InternalConsistency(msg.to_string())
    }

    pub fn unsupported<E: fmt::Display>(msg: E) -> Self {
        Self::Unsupported(msg.to_string())
    }

    pub fn config<E: fmt::Display>(msg: E) -> Self {
        Self::Config(msg.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InternalConsistency(_) => ErrorKind::InternalConsistency,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Session(_) => ErrorKind::Session,
            Self::Config(_) => ErrorKind::Config,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Numeric code from [`ErrorCode`]
    pub fn code(&self) -> u16 {
        match self {
            Self::Validation(_) => ErrorCode::VALIDATION_GENERIC,
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::InternalConsistency(_) => ErrorCode::INTERNAL_CONSISTENCY,
            Self::Unsupported(_) => ErrorCode::UNSUPPORTED_OPERATION,
            Self::Session(_) => ErrorCode::SESSION_GENERIC,
            Self::Config(_) => ErrorCode::CONFIG_GENERIC,
            Self::Storage(err) => err.code(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_internal_consistency(&self) -> bool {
        matches!(self, Self::InternalConsistency(_))
    }
}

/// A store reporting a missing record is surfaced as [`VersioningError::NotFound`];
/// anything else is passed through as-is.
impl From<StorageError> for VersioningError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => Self::NotFound(what),
            other => Self::Storage(other),
        }
    }
}

impl From<toml::de::Error> for VersioningError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid TOML: {err}"))
    }
}
