//! Gallery reads over a snapshot and guarded gallery writes.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use atelier_auth::password::PasswordHasher;
use atelier_auth::protection::ProtectionIndex;
use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_database::connection::{begin, commit};
use atelier_database::repositories::{ArtworkRepository, CascadeOutcome, GalleryRepository};
use atelier_entity::gallery::{
    CreateGallery, FlatGallery, Gallery, GalleryNode, UpdateGallery, ancestors,
    build_gallery_tree, flatten_gallery_tree, gallery_path, plan_cascade_delete,
    would_create_circular_reference,
};

use crate::context::AdminContext;
use crate::validation::{self, PasswordChange};
use crate::view::{Crumb, GalleryDetail, GalleryView, Viewer, gallery_previews};

/// Manages galleries.
#[derive(Debug, Clone)]
pub struct GalleryService {
    gallery_repo: Arc<GalleryRepository>,
    artwork_repo: Arc<ArtworkRepository>,
    hasher: PasswordHasher,
}

/// Request to create a gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGalleryRequest {
    /// Gallery name.
    pub name: String,
    /// Parent gallery (None for a root gallery).
    pub parent_id: Option<Uuid>,
    /// Plaintext password; blank or absent for none.
    pub password: Option<String>,
    /// Cover image URL.
    pub cover_image_url: Option<String>,
    /// Manual ordering position.
    pub display_order: Option<i32>,
}

/// Request to update a gallery.
///
/// Every field except `password` replaces the stored value. An absent
/// password keeps the current one; a blank password removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGalleryRequest {
    /// Gallery name.
    pub name: String,
    /// Parent gallery (None moves it to the root).
    pub parent_id: Option<Uuid>,
    /// Password change.
    pub password: Option<String>,
    /// Cover image URL.
    pub cover_image_url: Option<String>,
    /// Manual ordering position.
    pub display_order: Option<i32>,
}

impl GalleryService {
    /// Create a new gallery service.
    pub fn new(
        gallery_repo: Arc<GalleryRepository>,
        artwork_repo: Arc<ArtworkRepository>,
    ) -> Self {
        Self {
            gallery_repo,
            artwork_repo,
            hasher: PasswordHasher::new(),
        }
    }

    /// Load every gallery in display order.
    pub async fn snapshot(&self) -> AppResult<Vec<Gallery>> {
        self.gallery_repo.find_all().await
    }

    async fn previews(&self) -> AppResult<HashMap<Uuid, String>> {
        let candidates = self.artwork_repo.preview_candidates().await?;
        Ok(gallery_previews(candidates))
    }

    /// All galleries as flat views.
    pub async fn list(&self, viewer: Viewer<'_>) -> AppResult<Vec<GalleryView>> {
        let all = self.snapshot().await?;
        let previews = self.previews().await?;
        let index = ProtectionIndex::new(&all);

        Ok(all
            .iter()
            .map(|g| GalleryView::build(g, &index, viewer, &previews))
            .collect())
    }

    /// All galleries as a forest of views.
    pub async fn tree(&self, viewer: Viewer<'_>) -> AppResult<Vec<GalleryNode<GalleryView>>> {
        let all = self.snapshot().await?;
        let previews = self.previews().await?;
        let index = ProtectionIndex::new(&all);

        let mut to_view = |g: Gallery| GalleryView::build(&g, &index, viewer, &previews);
        Ok(build_gallery_tree(&all)
            .into_iter()
            .map(|node| node.map(&mut to_view))
            .collect())
    }

    /// One gallery with its path, breadcrumbs, and children.
    pub async fn detail(
        &self,
        gallery_id: Uuid,
        viewer: Viewer<'_>,
    ) -> AppResult<GalleryDetail> {
        let all = self.snapshot().await?;
        let gallery = find(&all, gallery_id)?;
        let previews = self.previews().await?;
        let index = ProtectionIndex::new(&all);

        let breadcrumbs = ancestors(gallery, &all)
            .into_iter()
            .map(|g| Crumb {
                id: g.id,
                name: g.name.clone(),
            })
            .collect();
        let children = all
            .iter()
            .filter(|g| g.parent_id == Some(gallery_id) && g.id != gallery_id)
            .map(|g| GalleryView::build(g, &index, viewer, &previews))
            .collect();

        Ok(GalleryDetail {
            gallery: GalleryView::build(gallery, &index, viewer, &previews),
            path: gallery_path(gallery, &all),
            breadcrumbs,
            children,
        })
    }

    /// Flattened tree for parent pickers.
    pub async fn picker(&self) -> AppResult<Vec<FlatGallery>> {
        let all = self.snapshot().await?;
        Ok(flatten_gallery_tree(&build_gallery_tree(&all)))
    }

    /// Human-readable path of one gallery.
    pub async fn path(&self, gallery_id: Uuid) -> AppResult<String> {
        let all = self.snapshot().await?;
        let gallery = find(&all, gallery_id)?;
        Ok(gallery_path(gallery, &all))
    }

    /// Create a gallery.
    pub async fn create(
        &self,
        ctx: &AdminContext,
        req: CreateGalleryRequest,
    ) -> AppResult<GalleryView> {
        let data = CreateGallery {
            name: validation::gallery_name(&req.name)?,
            parent_id: req.parent_id,
            password_hash: self.hasher.hash_optional(req.password.as_deref())?,
            cover_image_url: validation::optional_text(req.cover_image_url),
            display_order: req.display_order,
        };

        let mut tx = begin(self.gallery_repo.pool()).await?;
        let mut all = self.gallery_repo.lock_all(&mut tx).await?;
        require_parent(&all, data.parent_id)?;
        let gallery = self.gallery_repo.create(&mut tx, &data).await?;
        commit(tx).await?;

        info!(
            admin = %ctx.username,
            gallery_id = %gallery.id,
            parent_id = ?gallery.parent_id,
            "Gallery created"
        );

        all.push(gallery.clone());
        Ok(admin_view(&gallery, &all))
    }

    /// Update a gallery, rejecting moves that would create a cycle.
    pub async fn update(
        &self,
        ctx: &AdminContext,
        gallery_id: Uuid,
        req: UpdateGalleryRequest,
    ) -> AppResult<GalleryView> {
        let name = validation::gallery_name(&req.name)?;
        let password_change = PasswordChange::from_input(req.password.as_deref());

        let mut tx = begin(self.gallery_repo.pool()).await?;
        let mut all = self.gallery_repo.lock_all(&mut tx).await?;
        let current = find(&all, gallery_id)?;

        require_parent(&all, req.parent_id)?;
        if would_create_circular_reference(gallery_id, req.parent_id, &all) {
            warn!(
                admin = %ctx.username,
                gallery_id = %gallery_id,
                parent_id = ?req.parent_id,
                "Rejected gallery move that would create a cycle"
            );
            return Err(AppError::validation(
                "A gallery cannot be moved into itself or one of its descendants",
            ));
        }

        let data = UpdateGallery {
            name,
            parent_id: req.parent_id,
            password_hash: password_change.apply(current.password_hash.clone(), &self.hasher)?,
            cover_image_url: validation::optional_text(req.cover_image_url),
            display_order: req.display_order,
        };
        let moved = current.parent_id != data.parent_id;

        let gallery = self.gallery_repo.update(&mut tx, gallery_id, &data).await?;
        commit(tx).await?;

        if moved {
            info!(
                admin = %ctx.username,
                gallery_id = %gallery_id,
                parent_id = ?gallery.parent_id,
                "Gallery moved"
            );
        }
        info!(admin = %ctx.username, gallery_id = %gallery_id, "Gallery updated");

        replace(&mut all, gallery.clone());
        Ok(admin_view(&gallery, &all))
    }

    /// Set or clear a gallery's cover image.
    pub async fn set_cover(
        &self,
        ctx: &AdminContext,
        gallery_id: Uuid,
        cover_image_url: Option<String>,
    ) -> AppResult<GalleryView> {
        let cover = validation::optional_text(cover_image_url);
        let gallery = self
            .gallery_repo
            .set_cover(gallery_id, cover.as_deref())
            .await?;

        info!(admin = %ctx.username, gallery_id = %gallery_id, "Gallery cover changed");

        let mut all = self.snapshot().await?;
        replace(&mut all, gallery.clone());
        Ok(admin_view(&gallery, &all))
    }

    /// Apply new display positions to several galleries at once.
    pub async fn reorder(
        &self,
        ctx: &AdminContext,
        order: Vec<(Uuid, Option<i32>)>,
    ) -> AppResult<u64> {
        let mut tx = begin(self.gallery_repo.pool()).await?;
        let updated = self.gallery_repo.reorder(&mut tx, &order).await?;
        commit(tx).await?;

        info!(admin = %ctx.username, requested = order.len(), updated, "Galleries reordered");
        Ok(updated)
    }

    /// Delete a gallery and every descendant, detaching their artworks.
    ///
    /// Runs in one transaction: any failure leaves the tree untouched.
    pub async fn delete(
        &self,
        ctx: &AdminContext,
        gallery_id: Uuid,
    ) -> AppResult<CascadeOutcome> {
        let mut tx = begin(self.gallery_repo.pool()).await?;
        let all = self.gallery_repo.lock_all(&mut tx).await?;
        find(&all, gallery_id)?;

        let plan = plan_cascade_delete(gallery_id, &all);
        let outcome = self
            .gallery_repo
            .delete_subtree(&mut tx, gallery_id, &plan)
            .await?;
        commit(tx).await?;

        info!(
            admin = %ctx.username,
            gallery_id = %gallery_id,
            galleries_deleted = outcome.galleries_deleted,
            artworks_detached = outcome.artworks_detached,
            "Gallery deleted"
        );
        Ok(outcome)
    }
}

fn find(all: &[Gallery], gallery_id: Uuid) -> AppResult<&Gallery> {
    all.iter()
        .find(|g| g.id == gallery_id)
        .ok_or_else(|| AppError::not_found(format!("Gallery {gallery_id} not found")))
}

fn require_parent(all: &[Gallery], parent_id: Option<Uuid>) -> AppResult<()> {
    match parent_id {
        Some(id) if !all.iter().any(|g| g.id == id) => Err(AppError::validation(format!(
            "Parent gallery {id} not found"
        ))),
        _ => Ok(()),
    }
}

fn replace(all: &mut Vec<Gallery>, gallery: Gallery) {
    match all.iter_mut().find(|g| g.id == gallery.id) {
        Some(slot) => *slot = gallery,
        None => all.push(gallery),
    }
}

fn admin_view(gallery: &Gallery, all: &[Gallery]) -> GalleryView {
    let index = ProtectionIndex::new(all);
    GalleryView::build(gallery, &index, Viewer::Admin, &HashMap::new())
}
