use chrono::{DateTime, Utc};

use crate::domain::UserId;

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and checks the bearer tokens handed out at login.
pub trait TokenCodec: Send + Sync {
    fn issue(&self, user_id: UserId) -> Result<IssuedToken, CredentialError>;

    fn decode(&self, token: &str) -> Result<UserId, CredentialError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
    #[error("token signing failed: {0}")]
    SigningFailed(String),
    #[error("invalid token: {0}")]
    InvalidToken(String),
}
