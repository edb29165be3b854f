//! Artwork reads with protection applied, and artwork writes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use atelier_auth::password::PasswordHasher;
use atelier_auth::protection::ProtectionIndex;
use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::types::pagination::{PageRequest, PageResponse};
use atelier_database::connection::{begin, commit};
use atelier_database::repositories::{ArtworkRepository, GalleryRepository};
use atelier_entity::artwork::{
    ArtworkImage, ArtworkPost, CreateArtwork, NewArtworkImage, UpdateArtwork, sort_images,
};
use atelier_entity::gallery::Gallery;
use atelier_storage::MediaStore;

use crate::context::AdminContext;
use crate::validation::{self, PasswordChange};
use crate::view::{ArtworkView, Viewer, images_by_post};

/// Maximum number of featured artworks returned.
const FEATURED_LIMIT: i64 = 24;

/// Manages artwork posts and their images.
#[derive(Debug, Clone)]
pub struct ArtworkService {
    artwork_repo: Arc<ArtworkRepository>,
    gallery_repo: Arc<GalleryRepository>,
    media: MediaStore,
    hasher: PasswordHasher,
}

/// Request to create an artwork.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtworkRequest {
    /// Title.
    pub title: String,
    /// HTML description.
    pub description: Option<String>,
    /// Asking price.
    pub price: Option<f64>,
    /// Containing gallery.
    pub gallery_id: Option<Uuid>,
    /// Plaintext password; blank or absent for none.
    pub password: Option<String>,
    /// Featured flag.
    pub is_pinned: bool,
    /// Manual ordering position.
    pub display_order: Option<i32>,
    /// Images, in display order.
    pub images: Vec<NewArtworkImage>,
}

/// Request to update an artwork.
///
/// An absent password keeps the current one and a blank one removes it.
/// Absent `images` leaves the stored images untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateArtworkRequest {
    /// Title.
    pub title: String,
    /// HTML description.
    pub description: Option<String>,
    /// Asking price.
    pub price: Option<f64>,
    /// Containing gallery.
    pub gallery_id: Option<Uuid>,
    /// Password change.
    pub password: Option<String>,
    /// Featured flag.
    pub is_pinned: bool,
    /// Manual ordering position.
    pub display_order: Option<i32>,
    /// Replacement images.
    pub images: Option<Vec<NewArtworkImage>>,
}

impl ArtworkService {
    /// Create a new artwork service.
    pub fn new(
        artwork_repo: Arc<ArtworkRepository>,
        gallery_repo: Arc<GalleryRepository>,
        media: MediaStore,
    ) -> Self {
        Self {
            artwork_repo,
            gallery_repo,
            media,
            hasher: PasswordHasher::new(),
        }
    }

    async fn views(
        &self,
        posts: Vec<ArtworkPost>,
        galleries: &[Gallery],
        viewer: Viewer<'_>,
    ) -> AppResult<Vec<ArtworkView>> {
        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let mut images = images_by_post(self.artwork_repo.images_for_posts(&ids).await?);
        let index = ProtectionIndex::new(galleries);

        Ok(posts
            .iter()
            .map(|post| {
                let own_images = images.remove(&post.id).unwrap_or_default();
                ArtworkView::build(post, own_images, &index, viewer)
            })
            .collect())
    }

    /// A page of artworks, optionally within one gallery.
    pub async fn list(
        &self,
        gallery_id: Option<Uuid>,
        page: &PageRequest,
        viewer: Viewer<'_>,
    ) -> AppResult<PageResponse<ArtworkView>> {
        let galleries = self.gallery_repo.find_all().await?;
        let PageResponse {
            items,
            page: current_page,
            page_size,
            total_items,
            ..
        } = self.artwork_repo.list(gallery_id, page).await?;

        let views = self.views(items, &galleries, viewer).await?;
        Ok(PageResponse::new(views, current_page, page_size, total_items))
    }

    /// Every artwork in one gallery.
    pub async fn list_in_gallery(
        &self,
        gallery_id: Uuid,
        viewer: Viewer<'_>,
    ) -> AppResult<Vec<ArtworkView>> {
        let galleries = self.gallery_repo.find_all().await?;
        if !galleries.iter().any(|g| g.id == gallery_id) {
            return Err(AppError::not_found(format!("Gallery {gallery_id} not found")));
        }
        let posts = self.artwork_repo.find_by_gallery(gallery_id).await?;
        self.views(posts, &galleries, viewer).await
    }

    /// Pinned artworks.
    pub async fn featured(&self, viewer: Viewer<'_>) -> AppResult<Vec<ArtworkView>> {
        let galleries = self.gallery_repo.find_all().await?;
        let posts = self.artwork_repo.find_featured(FEATURED_LIMIT).await?;
        self.views(posts, &galleries, viewer).await
    }

    /// One artwork.
    pub async fn get(&self, artwork_id: Uuid, viewer: Viewer<'_>) -> AppResult<ArtworkView> {
        let post = self.find(artwork_id).await?;
        let galleries = self.gallery_repo.find_all().await?;
        let images = self.artwork_repo.images_for(artwork_id).await?;
        let index = ProtectionIndex::new(&galleries);
        Ok(ArtworkView::build(&post, images, &index, viewer))
    }

    async fn find(&self, artwork_id: Uuid) -> AppResult<ArtworkPost> {
        self.artwork_repo
            .find_by_id(artwork_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Artwork {artwork_id} not found")))
    }

    async fn require_gallery(&self, gallery_id: Option<Uuid>) -> AppResult<Vec<Gallery>> {
        let galleries = self.gallery_repo.find_all().await?;
        if let Some(id) = gallery_id {
            if !galleries.iter().any(|g| g.id == id) {
                return Err(AppError::validation(format!("Gallery {id} not found")));
            }
        }
        Ok(galleries)
    }

    /// Create an artwork with its images.
    pub async fn create(
        &self,
        ctx: &AdminContext,
        req: CreateArtworkRequest,
    ) -> AppResult<ArtworkView> {
        let data = CreateArtwork {
            title: validation::artwork_title(&req.title)?,
            description: validation::optional_text(req.description),
            price: validation::price(req.price)?,
            gallery_id: req.gallery_id,
            password_hash: self.hasher.hash_optional(req.password.as_deref())?,
            is_pinned: req.is_pinned,
            display_order: req.display_order,
            images: validation::images(req.images)?,
        };
        let galleries = self.require_gallery(data.gallery_id).await?;

        let mut tx = begin(self.artwork_repo.pool()).await?;
        let (post, images) = self.artwork_repo.create(&mut tx, &data).await?;
        commit(tx).await?;

        info!(
            admin = %ctx.username,
            artwork_id = %post.id,
            gallery_id = ?post.gallery_id,
            images = images.len(),
            "Artwork created"
        );

        let index = ProtectionIndex::new(&galleries);
        Ok(ArtworkView::build(&post, images, &index, Viewer::Admin))
    }

    /// Update an artwork; image objects dropped by the update are deleted.
    pub async fn update(
        &self,
        ctx: &AdminContext,
        artwork_id: Uuid,
        req: UpdateArtworkRequest,
    ) -> AppResult<ArtworkView> {
        let current = self.find(artwork_id).await?;
        let images = req.images.map(validation::images).transpose()?;
        let data = UpdateArtwork {
            title: validation::artwork_title(&req.title)?,
            description: validation::optional_text(req.description),
            price: validation::price(req.price)?,
            gallery_id: req.gallery_id,
            password_hash: PasswordChange::from_input(req.password.as_deref())
                .apply(current.password_hash, &self.hasher)?,
            is_pinned: req.is_pinned,
            display_order: req.display_order,
            images,
        };
        let galleries = self.require_gallery(data.gallery_id).await?;

        let mut tx = begin(self.artwork_repo.pool()).await?;
        let (post, images, removed) = self
            .artwork_repo
            .update(&mut tx, artwork_id, &data)
            .await?;
        commit(tx).await?;

        let objects_removed = self.media.delete_urls(&removed).await;
        info!(
            admin = %ctx.username,
            artwork_id = %artwork_id,
            objects_removed,
            "Artwork updated"
        );

        let index = ProtectionIndex::new(&galleries);
        Ok(ArtworkView::build(&post, images, &index, Viewer::Admin))
    }

    /// Delete an artwork, its images, and their stored objects.
    ///
    /// Returns the number of stored objects removed.
    pub async fn delete(&self, ctx: &AdminContext, artwork_id: Uuid) -> AppResult<usize> {
        let mut tx = begin(self.artwork_repo.pool()).await?;
        let urls = self
            .artwork_repo
            .delete(&mut tx, artwork_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Artwork {artwork_id} not found")))?;
        commit(tx).await?;

        let objects_removed = self.media.delete_urls(&urls).await;
        info!(
            admin = %ctx.username,
            artwork_id = %artwork_id,
            images = urls.len(),
            objects_removed,
            "Artwork deleted"
        );
        Ok(objects_removed)
    }

    /// Apply new positions to an artwork's images.
    pub async fn reorder_images(
        &self,
        ctx: &AdminContext,
        artwork_id: Uuid,
        order: Vec<(Uuid, i32)>,
    ) -> AppResult<Vec<ArtworkImage>> {
        self.find(artwork_id).await?;

        let mut tx = begin(self.artwork_repo.pool()).await?;
        let updated = self
            .artwork_repo
            .reorder_images(&mut tx, artwork_id, &order)
            .await?;
        commit(tx).await?;

        info!(
            admin = %ctx.username,
            artwork_id = %artwork_id,
            updated,
            "Artwork images reordered"
        );

        let mut images = self.artwork_repo.images_for(artwork_id).await?;
        sort_images(&mut images);
        Ok(images)
    }
}
