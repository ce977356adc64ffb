use crate::application::ports::{CredentialError, RepositoryError};

/// Failure categories surfaced by the application services. Each maps to a
/// single HTTP status in the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => ServiceError::NotFound(what),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<CredentialError> for ServiceError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidToken(_) => {
                ServiceError::Unauthorized("Could not validate credentials".to_string())
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
