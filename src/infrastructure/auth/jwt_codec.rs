use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{CredentialError, IssuedToken, TokenCodec};
use crate::domain::UserId;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Stringified user id.
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 bearer tokens carrying the user id as subject.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenCodec {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: UserId) -> Result<IssuedToken, CredentialError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CredentialError::SigningFailed(e.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn decode(&self, token: &str) -> Result<UserId, CredentialError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| CredentialError::InvalidToken(e.to_string()))?;
        data.claims
            .sub
            .parse::<i64>()
            .map(UserId::from_i64)
            .map_err(|_| CredentialError::InvalidToken("subject is not a user id".to_string()))
    }
}
