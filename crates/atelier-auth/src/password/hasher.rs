//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use atelier_core::error::AppError;
use atelier_entity::password::normalize_password;

/// Hashes and verifies passwords with Argon2id.
///
/// Gallery and artwork passwords go through the same hasher as the admin
/// password; only the PHC string is ever stored.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Normalize a submitted protection password and hash it.
    ///
    /// Blank input means "no password" and yields `None`.
    pub fn hash_optional(&self, password: Option<&str>) -> Result<Option<String>, AppError> {
        normalize_password(password)
            .map(|p| self.hash_password(&p))
            .transpose()
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for malformed
    /// stored hashes.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("secret", &hash).unwrap());
        assert!(!hasher.verify_password("Secret", &hash).unwrap());
    }

    #[test]
    fn test_hash_optional_treats_blank_as_none() {
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.hash_optional(Some("   ")).unwrap(), None);
        assert_eq!(hasher.hash_optional(None).unwrap(), None);

        let hash = hasher.hash_optional(Some(" pw ")).unwrap().unwrap();
        assert!(hasher.verify_password("pw", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_password("x", "not-a-phc-string").is_err());
    }
}
