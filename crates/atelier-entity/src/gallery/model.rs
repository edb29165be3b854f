//! Gallery entity model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::password::{Protected, non_empty};

/// Maximum gallery name length, counted in characters after trimming.
pub const MAX_GALLERY_NAME_LEN: usize = 200;

/// A gallery: a named folder node that holds artworks and child galleries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Gallery {
    /// Unique gallery identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Parent gallery ID (null for root galleries).
    pub parent_id: Option<Uuid>,
    /// Argon2 hash of the gallery's own password, if any.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Cover image URL.
    pub cover_image_url: Option<String>,
    /// Manual ordering position; `None` sorts last.
    pub display_order: Option<i32>,
    /// When the gallery was created.
    pub created_at: DateTime<Utc>,
    /// When the gallery was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Gallery {
    /// Check if this is a root gallery (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Protected for Gallery {
    fn own_password(&self) -> Option<&str> {
        non_empty(self.password_hash.as_ref())
    }
}

/// Data required to create a new gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGallery {
    /// Display name (already trimmed and validated).
    pub name: String,
    /// Parent gallery (None for root).
    pub parent_id: Option<Uuid>,
    /// Password hash (None for no own password).
    pub password_hash: Option<String>,
    /// Cover image URL.
    pub cover_image_url: Option<String>,
    /// Manual ordering position.
    pub display_order: Option<i32>,
}

/// Full replacement of a gallery's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGallery {
    /// Display name.
    pub name: String,
    /// Parent gallery.
    pub parent_id: Option<Uuid>,
    /// Password hash.
    pub password_hash: Option<String>,
    /// Cover image URL.
    pub cover_image_url: Option<String>,
    /// Manual ordering position.
    pub display_order: Option<i32>,
}

impl From<&Gallery> for UpdateGallery {
    fn from(gallery: &Gallery) -> Self {
        Self {
            name: gallery.name.clone(),
            parent_id: gallery.parent_id,
            password_hash: gallery.password_hash.clone(),
            cover_image_url: gallery.cover_image_url.clone(),
            display_order: gallery.display_order,
        }
    }
}

/// Compare two optional display positions, placing `None` after every value.
pub(crate) fn cmp_display_order(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort galleries by display order (unset last), then case-insensitive name.
pub fn sort_galleries(galleries: &mut [Gallery]) {
    galleries.sort_by(|a, b| {
        cmp_display_order(a.display_order, b.display_order)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}
