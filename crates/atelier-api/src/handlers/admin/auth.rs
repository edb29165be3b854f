//! Admin login.

use axum::Json;
use axum::extract::State;
use tracing::{info, warn};

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    if let Err(e) = state.admin.authenticate(&req.username, &req.password) {
        warn!(username = %req.username, "Admin login rejected");
        return Err(e.into());
    }

    let (access_token, expires_at) = state.jwt_encoder.generate_access_token(&req.username)?;
    info!(username = %req.username, "Admin logged in");

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token,
        expires_at,
    })))
}
