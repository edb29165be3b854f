//! Admin gallery handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use atelier_entity::gallery::FlatGallery;
use atelier_service::GalleryView;

use crate::dto::request::{CoverRequest, GalleryOrderRequest, GalleryRequest};
use crate::dto::response::{ApiResponse, DeleteGalleryResponse, ReorderResponse};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/galleries/picker
pub async fn picker(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<FlatGallery>>>> {
    let entries = state.gallery_service.picker().await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// POST /api/admin/galleries
pub async fn create_gallery(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<GalleryRequest>,
) -> ApiResult<Json<ApiResponse<GalleryView>>> {
    let gallery = state.gallery_service.create(&admin, req.into()).await?;
    Ok(Json(ApiResponse::ok(gallery)))
}

/// PUT /api/admin/galleries/{id}
pub async fn update_gallery(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<GalleryRequest>,
) -> ApiResult<Json<ApiResponse<GalleryView>>> {
    let gallery = state.gallery_service.update(&admin, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(gallery)))
}

/// PUT /api/admin/galleries/{id}/cover
pub async fn set_cover(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CoverRequest>,
) -> ApiResult<Json<ApiResponse<GalleryView>>> {
    let gallery = state
        .gallery_service
        .set_cover(&admin, id, req.cover_image_url)
        .await?;
    Ok(Json(ApiResponse::ok(gallery)))
}

/// PUT /api/admin/galleries/order
pub async fn reorder_galleries(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<GalleryOrderRequest>,
) -> ApiResult<Json<ApiResponse<ReorderResponse>>> {
    let order = req
        .items
        .into_iter()
        .map(|item| (item.id, item.display_order))
        .collect();
    let updated = state.gallery_service.reorder(&admin, order).await?;
    Ok(Json(ApiResponse::ok(ReorderResponse { updated })))
}

/// DELETE /api/admin/galleries/{id}
///
/// Removes the gallery and all of its descendants. Their artworks are
/// kept and become unfiled.
pub async fn delete_gallery(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<DeleteGalleryResponse>>> {
    let outcome = state.gallery_service.delete(&admin, id).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}
