//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Admin credential and token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Signs both admin access
    /// tokens and visitor unlock tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Admin login name.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Argon2 PHC hash of the admin password (`atelier-cli admin hash-password`).
    #[serde(default)]
    pub admin_password_hash: String,
    /// Admin access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Visitor unlock token TTL in minutes.
    #[serde(default = "default_unlock_ttl")]
    pub unlock_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            admin_username: default_admin_username(),
            admin_password_hash: String::new(),
            access_ttl_minutes: default_access_ttl(),
            unlock_ttl_minutes: default_unlock_ttl(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_unlock_ttl() -> u64 {
    120
}
