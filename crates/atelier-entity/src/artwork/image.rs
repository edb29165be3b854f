//! Artwork image entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::gallery::model::cmp_display_order;

/// One image attached to an artwork post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArtworkImage {
    /// Unique image identifier.
    pub id: Uuid,
    /// The owning artwork post.
    pub post_id: Uuid,
    /// Public URL of the stored image object.
    pub image_url: String,
    /// Position within the post; the lowest value is the primary image.
    pub display_order: Option<i32>,
}

/// An image reference submitted with a create or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArtworkImage {
    /// Public URL of the stored image object.
    pub image_url: String,
    /// Position within the post.
    pub display_order: Option<i32>,
}

/// The primary image of one illustrated artwork, as a gallery preview
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PreviewCandidate {
    /// Gallery holding the artwork.
    pub gallery_id: Uuid,
    /// The artwork's primary image.
    pub image_url: String,
    /// Whether the artwork sets a password of its own.
    pub post_protected: bool,
}

/// Sort images so the primary image comes first.
pub fn sort_images(images: &mut [ArtworkImage]) {
    images.sort_by(|a, b| cmp_display_order(a.display_order, b.display_order));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, order: Option<i32>) -> ArtworkImage {
        ArtworkImage {
            id: Uuid::new_v4(),
            post_id: Uuid::nil(),
            image_url: url.to_string(),
            display_order: order,
        }
    }

    #[test]
    fn test_lowest_display_order_first() {
        let mut images = vec![image("c", None), image("b", Some(2)), image("a", Some(0))];
        sort_images(&mut images);
        let urls: Vec<&str> = images.iter().map(|i| i.image_url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
    }
}
