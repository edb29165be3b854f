//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_core::types::pagination::PageRequest;

/// Query parameters for `GET /api/artworks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkListParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 24, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// Restrict to one gallery.
    pub gallery_id: Option<Uuid>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    24
}

impl ArtworkListParams {
    /// Converts to a `PageRequest`, clamping out-of-range values.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}
