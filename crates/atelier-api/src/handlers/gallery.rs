//! Public gallery handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use atelier_entity::GalleryNode;
use atelier_service::{ArtworkView, GalleryDetail, GalleryView, VerifyOutcome};

use crate::dto::request::VerifyPasswordRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, Visitor};
use crate::state::AppState;

/// GET /api/galleries
pub async fn list_galleries(
    State(state): State<AppState>,
    visitor: Visitor,
) -> ApiResult<Json<ApiResponse<Vec<GalleryView>>>> {
    let galleries = state.gallery_service.list(visitor.viewer()).await?;
    Ok(Json(ApiResponse::ok(galleries)))
}

/// GET /api/galleries/tree
pub async fn gallery_tree(
    State(state): State<AppState>,
    visitor: Visitor,
) -> ApiResult<Json<ApiResponse<Vec<GalleryNode<GalleryView>>>>> {
    let tree = state.gallery_service.tree(visitor.viewer()).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/galleries/{id}
pub async fn get_gallery(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<GalleryDetail>>> {
    let detail = state.gallery_service.detail(id, visitor.viewer()).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// GET /api/galleries/{id}/artworks
pub async fn list_gallery_artworks(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<ArtworkView>>>> {
    let artworks = state
        .artwork_service
        .list_in_gallery(id, visitor.viewer())
        .await?;
    Ok(Json(ApiResponse::ok(artworks)))
}

/// POST /api/galleries/{id}/verify
///
/// A wrong password is `200` with `is_valid: false`. A correct one
/// returns an unlock token covering this gallery plus everything the
/// presented token already unlocked.
pub async fn verify_gallery_password(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<VerifyPasswordRequest>,
) -> ApiResult<Json<ApiResponse<VerifyOutcome>>> {
    let outcome = state
        .access_service
        .verify_gallery(id, &req.password, visitor.grant)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
