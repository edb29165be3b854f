//! Admin credential verification.

use tracing::warn;

use atelier_core::config::AuthConfig;
use atelier_core::error::AppError;

use crate::password::PasswordHasher;

/// Checks admin login credentials against the configured account.
#[derive(Debug, Clone)]
pub struct AdminAuthenticator {
    username: String,
    password_hash: String,
    hasher: PasswordHasher,
}

impl AdminAuthenticator {
    /// Create from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        if config.admin_password_hash.is_empty() {
            warn!("No admin password hash configured; admin login is disabled");
        }
        Self {
            username: config.admin_username.clone(),
            password_hash: config.admin_password_hash.clone(),
            hasher: PasswordHasher::new(),
        }
    }

    /// Verify a username and password pair.
    ///
    /// Unknown usernames and wrong passwords fail with the same message.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AppError> {
        if self.password_hash.is_empty() {
            return Err(AppError::authentication("Admin login is disabled"));
        }
        let password_ok = self.hasher.verify_password(password, &self.password_hash)?;
        if username != self.username || !password_ok {
            return Err(AppError::authentication("Invalid username or password"));
        }
        Ok(())
    }
}
