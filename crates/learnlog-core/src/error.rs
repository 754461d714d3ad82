//! Error types for Learnlog core operations.
//!
//! The variants double as the sync taxonomy: connectivity failures
//! (`Network`, `Timeout`, `Server`) push the controller offline, the rest are
//! surfaced to the caller without a mode change. The CLI layer maps these to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Learnlog operations.
pub type Result<T> = std::result::Result<T, LearnlogError>;

/// Core error type for Learnlog operations.
#[derive(Debug, Error)]
pub enum LearnlogError {
    /// Connection refused, DNS failure, or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The backend did not answer within the request timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Unexpected status or an undecodable response body
    #[error("Server error: {0}")]
    Server(String),

    /// Credential missing or rejected by the backend
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload rejected (locally or by the backend)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A remote-owned entry cannot be changed while offline
    #[error("Offline: {0}")]
    Offline(String),

    /// Local snapshot or session file error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl LearnlogError {
    /// Whether this failure means the backend is unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            LearnlogError::Network(_) | LearnlogError::Timeout(_) | LearnlogError::Server(_)
        )
    }

    /// Whether the session must be torn down and the user re-authenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, LearnlogError::Unauthorized(_))
    }
}

impl From<std::io::Error> for LearnlogError {
    fn from(err: std::io::Error) -> Self {
        LearnlogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LearnlogError {
    fn from(err: serde_json::Error) -> Self {
        LearnlogError::Storage(err.to_string())
    }
}
