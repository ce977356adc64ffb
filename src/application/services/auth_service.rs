use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ServiceError;
use crate::application::ports::{PasswordHasher, RepositoryError, TokenCodec, UserRepository};
use crate::domain::{NewUser, User, UserRole};

#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessGrant {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn register(&self, registration: Registration) -> Result<User, ServiceError> {
        let email = registration.email.trim().to_string();
        if !email.contains('@') {
            return Err(ServiceError::bad_request("A valid email is required"));
        }
        if registration.password.is_empty() {
            return Err(ServiceError::bad_request("Password must not be empty"));
        }
        if registration.name.trim().is_empty() {
            return Err(ServiceError::bad_request("Name must not be empty"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::bad_request("Email already registered"));
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let new_user = NewUser {
            email,
            password_hash,
            name: registration.name.trim().to_string(),
            role: registration.role,
        };

        let user = self.users.create(&new_user).await.map_err(|e| match e {
            RepositoryError::ConstraintViolation(_) => {
                ServiceError::bad_request("Email already registered")
            }
            other => other.into(),
        })?;

        info!(user_id = %user.id, role = %user.role, "Registered user");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AccessGrant, ServiceError> {
        let rejected = || ServiceError::Unauthorized("Incorrect email or password".to_string());

        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(rejected)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Rejected login with wrong password");
            return Err(rejected());
        }

        let issued = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, expires_at = %issued.expires_at, "Issued access token");

        Ok(AccessGrant {
            access_token: issued.token,
            token_type: "bearer",
            user,
        })
    }

    /// Resolves a bearer token to the account it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<User, ServiceError> {
        let user_id = self.tokens.decode(token)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Could not validate credentials".to_string()))
    }
}
