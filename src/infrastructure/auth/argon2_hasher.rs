use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::Argon2;

use crate::application::ports::{CredentialError, PasswordHasher};

/// Argon2id with default parameters; hashes are stored in PHC string form.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| CredentialError::HashingFailed(format!("malformed hash: {}", e)))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
