//! Admin access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use atelier_core::config::AuthConfig;
use atelier_core::error::AppError;

use super::claims::{AdminClaims, TokenType};

/// Validates admin access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Create a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<AdminClaims, AppError> {
        let claims = decode::<AdminClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })?
            .claims;

        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use crate::unlock::{UnlockGrant, UnlockTokens};
    use atelier_core::error::ErrorKind;

    #[test]
    fn test_round_trip() {
        let config = AuthConfig::default();
        let (token, _) = JwtEncoder::new(&config)
            .generate_access_token("admin")
            .unwrap();
        let claims = JwtDecoder::new(&config).decode_access_token(&token).unwrap();
        assert_eq!(claims.username(), "admin");
    }

    #[test]
    fn test_unlock_token_is_not_an_access_token() {
        let config = AuthConfig::default();
        let (token, _) = UnlockTokens::new(&config)
            .issue(&UnlockGrant::default())
            .unwrap();
        let err = JwtDecoder::new(&config)
            .decode_access_token(&token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = JwtEncoder::new(&AuthConfig::default())
            .generate_access_token("admin")
            .unwrap();
        let other = AuthConfig {
            jwt_secret: "different".to_string(),
            ..AuthConfig::default()
        };
        assert!(JwtDecoder::new(&other).decode_access_token(&token).is_err());
    }
}
