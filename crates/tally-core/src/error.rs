//! Shared error type across tally crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Requested resource does not exist.
    NotFound,
    /// Uniqueness constraint violated.
    Conflict,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and service.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TallyError::BadRequest(_) => ClientCode::BadRequest,
            TallyError::NotFound(_) => ClientCode::NotFound,
            TallyError::Conflict(_) => ClientCode::Conflict,
            TallyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TallyError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn user_not_found(id: u64) -> Self {
        TallyError::NotFound(format!("user not found with id: {id}"))
    }
}
