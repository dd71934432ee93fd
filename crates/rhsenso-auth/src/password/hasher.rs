//! Argon2id password hashing and verification.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use rhsenso_core::error::AppError;

/// Plaintext behind the hash verified when no account matches a login.
const DUMMY_PASSWORD: &str = "rhsenso-no-such-account";

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch. A stored value that is not a PHC
    /// hash string is an internal error, not a failed login.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Runs a full Argon2 verification against a throwaway hash and reports
    /// a mismatch, so a login for a missing account costs the same as one
    /// with a wrong password.
    pub fn verify_missing_account(&self, password: &str) -> bool {
        if let Some(hash) = self.dummy_hash() {
            let _ = self.verify_password(password, hash);
        }
        false
    }

    fn dummy_hash(&self) -> Option<&'static str> {
        DUMMY_HASH
            .get_or_init(|| self.hash_password(DUMMY_PASSWORD).ok())
            .as_deref()
    }
}
