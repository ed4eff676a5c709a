//! Error type shared by the store, the log manager and the action router

use axum::http::StatusCode;

/// Every failure the server can report to a caller.
///
/// | Category | Variants | HTTP |
/// |----------|----------|------|
/// | Domain | `InvalidInput`, `NotFound`, `UnknownAction`, `DuplicateResource` | 400 / 404 / 409 |
/// | Admission | `RateLimited`, `Unauthorized`, `Forbidden` | 429 / 401 / 403 |
/// | System | `StorageFailure`, `Internal` | 500 |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum McpError {
    /// Missing or malformed parameter
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Action name is not part of the catalogue
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Uniqueness violation
    #[error("{0}")]
    DuplicateResource(String),

    /// Admission denied by the rate limiter
    #[error("Rate limit exceeded: {limit}")]
    RateLimited { limit: String, retry_after_secs: u64 },

    /// No credential supplied
    #[error("{0}")]
    Unauthorized(String),

    /// Credential supplied but rejected
    #[error("{0}")]
    Forbidden(String),

    /// Persistence adapter failed to read or write
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl McpError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        McpError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        McpError::NotFound(message.into())
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        McpError::DuplicateResource(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        McpError::StorageFailure(message.into())
    }

    /// Expected, locally classified errors caused by the caller's input
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            McpError::InvalidInput(_)
                | McpError::NotFound(_)
                | McpError::UnknownAction(_)
                | McpError::DuplicateResource(_)
        )
    }

    /// HTTP status the API layer answers with
    pub fn status_code(&self) -> StatusCode {
        match self {
            McpError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            McpError::NotFound(_) | McpError::UnknownAction(_) => StatusCode::NOT_FOUND,
            McpError::DuplicateResource(_) => StatusCode::CONFLICT,
            McpError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            McpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            McpError::Forbidden(_) => StatusCode::FORBIDDEN,
            McpError::StorageFailure(_) | McpError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<std::io::Error> for McpError {
    fn from(e: std::io::Error) -> Self {
        McpError::StorageFailure(e.to_string())
    }
}

impl From<serde_json::Error> for McpError {
    fn from(e: serde_json::Error) -> Self {
        McpError::Internal(e.to_string())
    }
}
