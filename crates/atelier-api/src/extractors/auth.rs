//! `AdminUser` extractor: pulls the admin JWT from the Authorization
//! header, validates it, and injects an `AdminContext`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use atelier_core::error::AppError;
use atelier_service::AdminContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted admin context available in admin handlers.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminContext);

impl std::ops::Deref for AdminUser {
    type Target = AdminContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The bearer token of a request, if any.
pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::authentication("Missing or malformed Authorization header"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;
        Ok(AdminUser(AdminContext::new(claims.username())))
    }
}
