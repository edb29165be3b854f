//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use atelier_entity::artwork::NewArtworkImage;
use atelier_service::artwork::{CreateArtworkRequest, UpdateArtworkRequest};
use atelier_service::gallery::{CreateGalleryRequest, UpdateGalleryRequest};

/// Admin login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password submitted to unlock a gallery or artwork.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyPasswordRequest {
    /// Candidate password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Gallery create/update body.
///
/// On update, an absent `password` keeps the current one and an empty
/// string removes it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GalleryRequest {
    /// Display name.
    #[validate(length(
        min = 1,
        max = 200,
        message = "Gallery name must be 1-200 characters"
    ))]
    pub name: String,
    /// Parent gallery, `null` for a root.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Plain-text password.
    #[serde(default)]
    pub password: Option<String>,
    /// Cover image URL.
    #[serde(default)]
    pub cover_image_url: Option<String>,
    /// Sort position among siblings.
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl From<GalleryRequest> for CreateGalleryRequest {
    fn from(req: GalleryRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
            password: req.password,
            cover_image_url: req.cover_image_url,
            display_order: req.display_order,
        }
    }
}

impl From<GalleryRequest> for UpdateGalleryRequest {
    fn from(req: GalleryRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
            password: req.password,
            cover_image_url: req.cover_image_url,
            display_order: req.display_order,
        }
    }
}

/// Cover image change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CoverRequest {
    /// New cover URL; `null` or empty clears it.
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// One entry of a gallery reorder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryOrderItem {
    /// Gallery ID.
    pub id: Uuid,
    /// New position; `null` sorts last.
    pub display_order: Option<i32>,
}

/// Bulk gallery reorder body: a bare JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct GalleryOrderRequest {
    /// Entries to apply.
    #[validate(length(min = 1, message = "At least one gallery is required"))]
    pub items: Vec<GalleryOrderItem>,
}

/// One image of an artwork body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInput {
    /// Image URL.
    pub image_url: String,
    /// Position within the artwork.
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl From<ImageInput> for NewArtworkImage {
    fn from(input: ImageInput) -> Self {
        Self {
            image_url: input.image_url,
            display_order: input.display_order,
        }
    }
}

/// Artwork create/update body.
///
/// On update, absent `images` keeps the current set and absent
/// `password` keeps the current password; an empty password removes it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ArtworkRequest {
    /// Title.
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be 1-200 characters"
    ))]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Asking price.
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    /// Containing gallery; `null` leaves it unfiled.
    #[serde(default)]
    pub gallery_id: Option<Uuid>,
    /// Plain-text password.
    #[serde(default)]
    pub password: Option<String>,
    /// Shown on the featured list.
    #[serde(default)]
    pub is_pinned: bool,
    /// Sort position within the gallery.
    #[serde(default)]
    pub display_order: Option<i32>,
    /// Images in order.
    #[serde(default)]
    pub images: Option<Vec<ImageInput>>,
}

fn into_images(images: Option<Vec<ImageInput>>) -> Option<Vec<NewArtworkImage>> {
    images.map(|list| list.into_iter().map(NewArtworkImage::from).collect())
}

impl From<ArtworkRequest> for CreateArtworkRequest {
    fn from(req: ArtworkRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            gallery_id: req.gallery_id,
            password: req.password,
            is_pinned: req.is_pinned,
            display_order: req.display_order,
            images: into_images(req.images).unwrap_or_default(),
        }
    }
}

impl From<ArtworkRequest> for UpdateArtworkRequest {
    fn from(req: ArtworkRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            gallery_id: req.gallery_id,
            password: req.password,
            is_pinned: req.is_pinned,
            display_order: req.display_order,
            images: into_images(req.images),
        }
    }
}

/// One entry of an image reorder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageOrderItem {
    /// Image ID.
    pub id: Uuid,
    /// New position.
    pub display_order: i32,
}

/// Bulk image reorder body: a bare JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct ImageOrderRequest {
    /// Entries to apply.
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub items: Vec<ImageOrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_name_rules() {
        let mut req: GalleryRequest = serde_json::from_str(r#"{"name": "Oils"}"#).unwrap();
        assert!(req.validate().is_ok());
        req.name = String::new();
        assert!(req.validate().is_err());
        req.name = "x".repeat(201);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let req: ArtworkRequest =
            serde_json::from_str(r#"{"title": "Dawn", "price": -1.0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_absent_images_keep_current_on_update() {
        let req: ArtworkRequest = serde_json::from_str(r#"{"title": "Dawn"}"#).unwrap();
        let update = UpdateArtworkRequest::from(req.clone());
        assert!(update.images.is_none());
        let create = CreateArtworkRequest::from(req);
        assert!(create.images.is_empty());
    }

    #[test]
    fn test_order_request_is_bare_array() {
        let id = Uuid::from_u128(1);
        let raw = format!(r#"[{{"id": "{id}", "display_order": null}}]"#);
        let req: GalleryOrderRequest = serde_json::from_str(&raw).unwrap();
        assert_eq!(req.items.len(), 1);
        assert!(req.validate().is_ok());

        let empty: GalleryOrderRequest = serde_json::from_str("[]").unwrap();
        assert!(empty.validate().is_err());
    }
}
