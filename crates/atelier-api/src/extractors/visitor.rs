//! `Visitor` extractor: who is reading, and what they have unlocked.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use atelier_auth::UnlockGrant;
use atelier_service::Viewer;

use super::auth::bearer_token;
use crate::state::AppState;

/// Header carrying a visitor's unlock token.
pub const UNLOCK_HEADER: &str = "x-unlock-token";

#[derive(Debug, Deserialize)]
struct UnlockQuery {
    unlock: Option<String>,
}

/// The reader of a public endpoint.
///
/// A valid admin bearer token sees everything. Otherwise the unlock token
/// from the `X-Unlock-Token` header (or the `unlock` query parameter) is
/// decoded into a grant; a missing, forged, or expired token grants
/// nothing and never rejects the request.
#[derive(Debug, Clone, Default)]
pub struct Visitor {
    /// Whether the request carries a valid admin token.
    pub is_admin: bool,
    /// Galleries and artworks this visitor has unlocked.
    pub grant: UnlockGrant,
}

impl Visitor {
    /// The view perspective for the service layer.
    pub fn viewer(&self) -> Viewer<'_> {
        if self.is_admin {
            Viewer::Admin
        } else {
            Viewer::Visitor(&self.grant)
        }
    }

    /// Unlock token presented with the request, header first.
    fn presented_token(parts: &Parts) -> Option<String> {
        let from_header = parts
            .headers
            .get(UNLOCK_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        from_header.or_else(|| {
            Query::<UnlockQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(q)| q.unlock)
                .filter(|t| !t.is_empty())
        })
    }
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let is_admin = bearer_token(parts)
            .is_some_and(|token| state.jwt_decoder.decode_access_token(token).is_ok());

        let grant = if is_admin {
            UnlockGrant::default()
        } else {
            state
                .access_service
                .grant_from_token(Self::presented_token(parts).as_deref())
        };

        Ok(Visitor { is_admin, grant })
    }
}
