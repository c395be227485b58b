//! Shared error type across lizardclick crates.

use thiserror::Error;

/// Stable error codes used in logs and ops output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Backing store unreachable or failed the operation.
    StorageUnavailable,
    /// Record already present on create.
    AlreadyExists,
    /// Stored document could not be decoded.
    CorruptRecord,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::StorageUnavailable => "STORAGE_UNAVAILABLE",
            ClientCode::AlreadyExists => "ALREADY_EXISTS",
            ClientCode::CorruptRecord => "CORRUPT_RECORD",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ClickError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ClickError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("record already exists: {0}")]
    AlreadyExists(String),
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ClickError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ClickError::BadRequest(_) => ClientCode::BadRequest,
            ClickError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            ClickError::StorageUnavailable(_) => ClientCode::StorageUnavailable,
            ClickError::AlreadyExists(_) => ClientCode::AlreadyExists,
            ClickError::CorruptRecord(_) => ClientCode::CorruptRecord,
            ClickError::Internal(_) => ClientCode::Internal,
        }
    }
}
