//! Public artwork handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use atelier_core::types::pagination::PageResponse;
use atelier_service::{ArtworkView, VerifyOutcome};

use crate::dto::request::VerifyPasswordRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{ArtworkListParams, ValidatedJson, Visitor};
use crate::state::AppState;

/// GET /api/artworks?page=&per_page=&gallery_id=
pub async fn list_artworks(
    State(state): State<AppState>,
    visitor: Visitor,
    Query(params): Query<ArtworkListParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<ArtworkView>>>> {
    let page = state
        .artwork_service
        .list(params.gallery_id, &params.page_request(), visitor.viewer())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/artworks/featured
pub async fn featured_artworks(
    State(state): State<AppState>,
    visitor: Visitor,
) -> ApiResult<Json<ApiResponse<Vec<ArtworkView>>>> {
    let artworks = state.artwork_service.featured(visitor.viewer()).await?;
    Ok(Json(ApiResponse::ok(artworks)))
}

/// GET /api/artworks/{id}
pub async fn get_artwork(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ArtworkView>>> {
    let artwork = state.artwork_service.get(id, visitor.viewer()).await?;
    Ok(Json(ApiResponse::ok(artwork)))
}

/// POST /api/artworks/{id}/verify
pub async fn verify_artwork_password(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<VerifyPasswordRequest>,
) -> ApiResult<Json<ApiResponse<VerifyOutcome>>> {
    let outcome = state
        .access_service
        .verify_post(id, &req.password, visitor.grant)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
