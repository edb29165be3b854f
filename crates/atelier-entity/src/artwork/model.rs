//! Artwork post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::image::NewArtworkImage;
use crate::gallery::model::cmp_display_order;
use crate::password::{Protected, non_empty};

/// Maximum artwork title length, counted in characters after trimming.
pub const MAX_ARTWORK_TITLE_LEN: usize = 200;

/// An artwork post: a titled entry with images, optionally placed in a gallery.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArtworkPost {
    /// Unique artwork identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// HTML description.
    pub description: Option<String>,
    /// Asking price; `None` when not for sale or on request.
    pub price: Option<f64>,
    /// The gallery holding this artwork (None once detached).
    pub gallery_id: Option<Uuid>,
    /// Argon2 hash of the artwork's own password, if any.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Featured on the landing page.
    pub is_pinned: bool,
    /// Manual ordering position; `None` sorts last.
    pub display_order: Option<i32>,
    /// When the artwork was created.
    pub created_at: DateTime<Utc>,
    /// When the artwork was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ArtworkPost {
    /// Whether the artwork has been detached from every gallery.
    pub fn is_unfiled(&self) -> bool {
        self.gallery_id.is_none()
    }
}

impl Protected for ArtworkPost {
    fn own_password(&self) -> Option<&str> {
        non_empty(self.password_hash.as_ref())
    }
}

/// Data required to create a new artwork post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtwork {
    /// Title (already trimmed and validated).
    pub title: String,
    /// HTML description.
    pub description: Option<String>,
    /// Asking price.
    pub price: Option<f64>,
    /// Target gallery.
    pub gallery_id: Option<Uuid>,
    /// Password hash.
    pub password_hash: Option<String>,
    /// Featured flag.
    pub is_pinned: bool,
    /// Manual ordering position.
    pub display_order: Option<i32>,
    /// Images, in submission order.
    pub images: Vec<NewArtworkImage>,
}

/// Full replacement of an artwork's mutable fields.
///
/// `images` of `None` leaves the stored images untouched; `Some` replaces
/// them wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateArtwork {
    /// Title.
    pub title: String,
    /// HTML description.
    pub description: Option<String>,
    /// Asking price.
    pub price: Option<f64>,
    /// Target gallery.
    pub gallery_id: Option<Uuid>,
    /// Password hash.
    pub password_hash: Option<String>,
    /// Featured flag.
    pub is_pinned: bool,
    /// Manual ordering position.
    pub display_order: Option<i32>,
    /// Replacement images.
    pub images: Option<Vec<NewArtworkImage>>,
}

/// Sort artworks by display order (unset last), then newest first.
pub fn sort_artworks(artworks: &mut [ArtworkPost]) {
    artworks.sort_by(|a, b| {
        cmp_display_order(a.display_order, b.display_order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn artwork(title: &str, order: Option<i32>, age_minutes: i64) -> ArtworkPost {
        let created = Utc::now() - Duration::minutes(age_minutes);
        ArtworkPost {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            price: None,
            gallery_id: None,
            password_hash: None,
            is_pinned: false,
            display_order: order,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_sort_order_then_newest() {
        let mut list = vec![
            artwork("old", None, 30),
            artwork("new", None, 1),
            artwork("second", Some(5), 10),
            artwork("first", Some(1), 90),
        ];
        sort_artworks(&mut list);
        let titles: Vec<&str> = list.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "new", "old"]);
    }

    #[test]
    fn test_own_password_ignores_empty() {
        let mut a = artwork("x", None, 0);
        assert!(!a.has_own_password());
        a.password_hash = Some(String::new());
        assert!(!a.has_own_password());
        a.password_hash = Some("$argon2id$...".to_string());
        assert!(a.has_own_password());
        assert!(a.is_unfiled());
    }
}
