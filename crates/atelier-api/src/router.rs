//! Route definitions for the Atelier HTTP API.
//!
//! Public and admin routes are mounted under `/api`. Stored images are
//! served under the storage `public_base_url` when that is a local path.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(gallery_routes())
        .merge(artwork_routes())
        .merge(admin_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(path) = media_route(&state.config.storage.public_base_url) {
        router = router.route(&path, get(handlers::media::serve_media));
    }

    router
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Route pattern for stored images, when they are served by this process.
fn media_route(public_base_url: &str) -> Option<String> {
    let base = public_base_url.trim_end_matches('/');
    (base.starts_with('/') && !base.starts_with("/api")).then(|| format!("{base}/{{*key}}"))
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Public gallery browsing and unlocking
fn gallery_routes() -> Router<AppState> {
    use crate::handlers::gallery::*;
    Router::new()
        .route("/galleries", get(list_galleries))
        .route("/galleries/tree", get(gallery_tree))
        .route("/galleries/{id}", get(get_gallery))
        .route("/galleries/{id}/artworks", get(list_gallery_artworks))
        .route("/galleries/{id}/verify", post(verify_gallery_password))
}

/// Public artwork browsing and unlocking
fn artwork_routes() -> Router<AppState> {
    use crate::handlers::artwork::*;
    Router::new()
        .route("/artworks", get(list_artworks))
        .route("/artworks/featured", get(featured_artworks))
        .route("/artworks/{id}", get(get_artwork))
        .route("/artworks/{id}/verify", post(verify_artwork_password))
}

/// Admin endpoints (bearer token)
fn admin_routes() -> Router<AppState> {
    use crate::handlers::admin::{artwork, auth, gallery};
    Router::new()
        .route("/admin/login", post(auth::login))
        .route("/admin/galleries", post(gallery::create_gallery))
        .route("/admin/galleries/picker", get(gallery::picker))
        .route("/admin/galleries/order", put(gallery::reorder_galleries))
        .route(
            "/admin/galleries/{id}",
            put(gallery::update_gallery).delete(gallery::delete_gallery),
        )
        .route("/admin/galleries/{id}/cover", put(gallery::set_cover))
        .route("/admin/artworks", post(artwork::create_artwork))
        .route(
            "/admin/artworks/{id}",
            put(artwork::update_artwork).delete(artwork::delete_artwork),
        )
        .route(
            "/admin/artworks/{id}/images/order",
            put(artwork::reorder_images),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_route_only_for_local_paths() {
        assert_eq!(media_route("/media").as_deref(), Some("/media/{*key}"));
        assert_eq!(media_route("/media/").as_deref(), Some("/media/{*key}"));
        assert!(media_route("https://cdn.example.com/media").is_none());
        assert!(media_route("/api/media").is_none());
    }
}
