//! Signing and verification of unlock tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use atelier_core::config::AuthConfig;
use atelier_core::error::AppError;

use super::grant::UnlockGrant;
use crate::jwt::claims::TokenType;

/// Claims carried by an unlock token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockClaims {
    /// What was unlocked.
    #[serde(flatten)]
    pub grant: UnlockGrant,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID.
    pub jti: Uuid,
    /// Always [`TokenType::Unlock`].
    pub token_type: TokenType,
}

/// Issues and verifies unlock tokens.
#[derive(Clone)]
pub struct UnlockTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for UnlockTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockTokens")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl UnlockTokens {
    /// Create from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl: Duration::minutes(config.unlock_ttl_minutes as i64),
        }
    }

    /// Sign a token for `grant`, valid for the configured TTL.
    pub fn issue(&self, grant: &UnlockGrant) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.ttl;
        let claims = UnlockClaims {
            grant: grant.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenType::Unlock,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode unlock token: {e}")))?;
        Ok((token, exp))
    }

    /// Verify a presented token.
    ///
    /// Forged, expired, or malformed tokens yield an empty grant: they
    /// unlock nothing but do not fail the request.
    pub fn verify(&self, token: &str) -> UnlockGrant {
        match decode::<UnlockClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if data.claims.token_type == TokenType::Unlock => data.claims.grant,
            Ok(_) => {
                debug!("Ignoring non-unlock token presented as unlock token");
                UnlockGrant::default()
            }
            Err(e) => {
                debug!(error = %e, "Ignoring invalid unlock token");
                UnlockGrant::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = UnlockTokens::new(&config("s1"));
        let mut grant = UnlockGrant::default();
        grant.unlock_gallery(Uuid::from_u128(1));
        grant.unlock_post(Uuid::from_u128(2));

        let (token, exp) = tokens.issue(&grant).unwrap();
        assert!(exp > Utc::now());
        assert_eq!(tokens.verify(&token), grant);
    }

    #[test]
    fn test_foreign_signature_grants_nothing() {
        let mut grant = UnlockGrant::default();
        grant.unlock_gallery(Uuid::from_u128(1));
        let (token, _) = UnlockTokens::new(&config("other")).issue(&grant).unwrap();

        assert!(UnlockTokens::new(&config("s1")).verify(&token).is_empty());
    }

    #[test]
    fn test_expired_token_grants_nothing() {
        let mut cfg = config("s1");
        cfg.unlock_ttl_minutes = 0;
        let mut tokens = UnlockTokens::new(&cfg);
        tokens.ttl = Duration::minutes(-10);

        let mut grant = UnlockGrant::default();
        grant.unlock_gallery(Uuid::from_u128(1));
        let (token, _) = tokens.issue(&grant).unwrap();
        assert!(tokens.verify(&token).is_empty());
    }

    #[test]
    fn test_garbage_grants_nothing() {
        let tokens = UnlockTokens::new(&config("s1"));
        assert!(tokens.verify("not.a.token").is_empty());
        assert!(tokens.verify("").is_empty());
    }
}
