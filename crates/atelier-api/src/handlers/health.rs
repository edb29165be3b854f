//! Health check handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::traits::StorageProvider;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<DetailedHealthResponse>>> {
    let database = state.db.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Database health check failed");
        false
    });
    let storage = state
        .media
        .provider()
        .health_check()
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Storage health check failed");
            false
        });

    Ok(Json(ApiResponse::ok(readiness(database, storage)?)))
}

fn readiness(database: bool, storage: bool) -> AppResult<DetailedHealthResponse> {
    if !database {
        return Err(AppError::service_unavailable("Database is unreachable"));
    }
    if !storage {
        return Err(AppError::service_unavailable("Media storage is unavailable"));
    }
    Ok(DetailedHealthResponse {
        status: "ok".to_string(),
        database: "connected".to_string(),
        storage: "available".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::error::ErrorKind;
    use axum::http::StatusCode;

    use crate::error::ApiError;

    #[test]
    fn test_ready_when_everything_is_up() {
        let report = readiness(true, true).unwrap();
        assert_eq!(report.status, "ok");
        assert_eq!(report.database, "connected");
    }

    #[test]
    fn test_unavailable_dependency_maps_to_503() {
        for (database, storage) in [(false, true), (true, false), (false, false)] {
            let err = readiness(database, storage).unwrap_err();
            assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
            assert_eq!(ApiError(err).status().0, StatusCode::SERVICE_UNAVAILABLE);
        }
    }
}
