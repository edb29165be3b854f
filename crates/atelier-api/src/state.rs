//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use atelier_auth::{AdminAuthenticator, JwtDecoder, JwtEncoder, UnlockTokens};
use atelier_core::config::AppConfig;
use atelier_database::DatabasePool;
use atelier_database::repositories::{ArtworkRepository, GalleryRepository};
use atelier_service::{AccessService, ArtworkService, GalleryService};
use atelier_storage::MediaStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Artwork image store
    pub media: MediaStore,

    // ── Auth ─────────────────────────────────────────────────
    /// Admin access token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Admin access token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Admin credential check
    pub admin: Arc<AdminAuthenticator>,

    // ── Services ─────────────────────────────────────────────
    /// Gallery reads and admin writes
    pub gallery_service: Arc<GalleryService>,
    /// Artwork reads and admin writes
    pub artwork_service: Arc<ArtworkService>,
    /// Password verification and unlock tokens
    pub access_service: Arc<AccessService>,
}

impl AppState {
    /// Wire repositories, auth, and services over a pool and media store.
    pub fn new(config: AppConfig, db: DatabasePool, media: MediaStore) -> Self {
        let gallery_repo = Arc::new(GalleryRepository::new(db.pool().clone()));
        let artwork_repo = Arc::new(ArtworkRepository::new(db.pool().clone()));

        let gallery_service = Arc::new(GalleryService::new(
            Arc::clone(&gallery_repo),
            Arc::clone(&artwork_repo),
        ));
        let artwork_service = Arc::new(ArtworkService::new(
            Arc::clone(&artwork_repo),
            Arc::clone(&gallery_repo),
            media.clone(),
        ));
        let access_service = Arc::new(AccessService::new(
            Arc::clone(&gallery_repo),
            Arc::clone(&artwork_repo),
            UnlockTokens::new(&config.auth),
        ));

        Self {
            jwt_encoder: Arc::new(JwtEncoder::new(&config.auth)),
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            admin: Arc::new(AdminAuthenticator::new(&config.auth)),
            config: Arc::new(config),
            db,
            media,
            gallery_service,
            artwork_service,
            access_service,
        }
    }
}
