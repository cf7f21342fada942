//! Credential checking
//!
//! Argon2id hashing with PHC-formatted hash strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AuthError;

/// Well-formed Argon2id hash with default cost parameters that no password
/// matches. Verified against when the account does not exist so both login
/// failures cost the same.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hashes and verifies account passwords
pub trait CredentialChecker: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, AuthError>;

    /// Hash to verify against when there is no stored hash.
    fn decoy_hash(&self) -> &'static str;
}

#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialChecker;

impl Argon2CredentialChecker {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialChecker for Argon2CredentialChecker {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to hash password");
                AuthError::CredentialHashFailed
            })
    }

    fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(error = %e, "Stored password hash is malformed");
            AuthError::CredentialHashFailed
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn decoy_hash(&self) -> &'static str {
        DECOY_HASH
    }
}
