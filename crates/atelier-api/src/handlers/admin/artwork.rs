//! Admin artwork handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use atelier_entity::ArtworkImage;
use atelier_service::ArtworkView;

use crate::dto::request::{ArtworkRequest, ImageOrderRequest};
use crate::dto::response::{ApiResponse, DeleteArtworkResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/artworks
pub async fn create_artwork(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<ArtworkRequest>,
) -> ApiResult<Json<ApiResponse<ArtworkView>>> {
    let artwork = state.artwork_service.create(&admin, req.into()).await?;
    Ok(Json(ApiResponse::ok(artwork)))
}

/// PUT /api/admin/artworks/{id}
pub async fn update_artwork(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ArtworkRequest>,
) -> ApiResult<Json<ApiResponse<ArtworkView>>> {
    let artwork = state.artwork_service.update(&admin, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(artwork)))
}

/// DELETE /api/admin/artworks/{id}
pub async fn delete_artwork(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<DeleteArtworkResponse>>> {
    let images_removed = state.artwork_service.delete(&admin, id).await?;
    Ok(Json(ApiResponse::ok(DeleteArtworkResponse { images_removed })))
}

/// PUT /api/admin/artworks/{id}/images/order
pub async fn reorder_images(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ImageOrderRequest>,
) -> ApiResult<Json<ApiResponse<Vec<ArtworkImage>>>> {
    let order = req
        .items
        .into_iter()
        .map(|item| (item.id, item.display_order))
        .collect();
    let images = state
        .artwork_service
        .reorder_images(&admin, id, order)
        .await?;
    Ok(Json(ApiResponse::ok(images)))
}
