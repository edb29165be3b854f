//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_database::repositories::CascadeOutcome;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Readiness report for the database and media storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database state.
    pub database: String,
    /// Media storage state.
    pub storage: String,
}

/// Admin login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for admin endpoints.
    pub access_token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Result of a cascading gallery delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGalleryResponse {
    /// Galleries removed, including the target.
    pub galleries_deleted: u64,
    /// Artworks moved to unfiled.
    pub artworks_detached: u64,
}

impl From<CascadeOutcome> for DeleteGalleryResponse {
    fn from(outcome: CascadeOutcome) -> Self {
        Self {
            galleries_deleted: outcome.galleries_deleted,
            artworks_detached: outcome.artworks_detached,
        }
    }
}

/// Result of an artwork delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteArtworkResponse {
    /// Stored image objects removed alongside the artwork.
    pub images_removed: usize,
}

/// Result of a bulk reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderResponse {
    /// Rows updated.
    pub updated: u64,
}
