//! Gallery repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::gallery::model::{CreateGallery, Gallery, UpdateGallery};

const ORDER_BY: &str = "ORDER BY display_order ASC NULLS LAST, LOWER(name) ASC, created_at ASC";

/// Rows affected by a cascade delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Galleries removed, including the target.
    pub galleries_deleted: u64,
    /// Artworks whose `gallery_id` was cleared.
    pub artworks_detached: u64,
}

/// Repository for gallery CRUD and subtree maintenance.
///
/// Methods taking a `PgConnection` run on a caller-held transaction so
/// that a snapshot check and the write that depends on it commit together.
#[derive(Debug, Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    /// Create a new gallery repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository runs on.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Load every gallery, in display order.
    pub async fn find_all(&self) -> AppResult<Vec<Gallery>> {
        sqlx::query_as::<_, Gallery>(&format!("SELECT * FROM galleries {ORDER_BY}"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list galleries", e))
    }

    /// Load every gallery and lock the rows until the transaction ends.
    pub async fn lock_all(&self, conn: &mut PgConnection) -> AppResult<Vec<Gallery>> {
        sqlx::query_as::<_, Gallery>(&format!("SELECT * FROM galleries {ORDER_BY} FOR UPDATE"))
            .fetch_all(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock galleries", e))
    }

    /// Find a gallery by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Gallery>> {
        sqlx::query_as::<_, Gallery>("SELECT * FROM galleries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find gallery", e))
    }

    /// Insert a gallery.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        data: &CreateGallery,
    ) -> AppResult<Gallery> {
        sqlx::query_as::<_, Gallery>(
            "INSERT INTO galleries (name, parent_id, password_hash, cover_image_url, display_order) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(&data.password_hash)
        .bind(&data.cover_image_url)
        .bind(data.display_order)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create gallery", e))
    }

    /// Replace a gallery's mutable fields.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        data: &UpdateGallery,
    ) -> AppResult<Gallery> {
        sqlx::query_as::<_, Gallery>(
            "UPDATE galleries SET name = $2, parent_id = $3, password_hash = $4, \
             cover_image_url = $5, display_order = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(&data.password_hash)
        .bind(&data.cover_image_url)
        .bind(data.display_order)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update gallery", e))?
        .ok_or_else(|| AppError::not_found(format!("Gallery {id} not found")))
    }

    /// Set or clear the cover image.
    pub async fn set_cover(&self, id: Uuid, cover_image_url: Option<&str>) -> AppResult<Gallery> {
        sqlx::query_as::<_, Gallery>(
            "UPDATE galleries SET cover_image_url = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(cover_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set gallery cover", e))?
        .ok_or_else(|| AppError::not_found(format!("Gallery {id} not found")))
    }

    /// Apply new display positions; returns the number of galleries updated.
    pub async fn reorder(
        &self,
        conn: &mut PgConnection,
        order: &[(Uuid, Option<i32>)],
    ) -> AppResult<u64> {
        let mut updated = 0;
        for (id, display_order) in order {
            let result = sqlx::query(
                "UPDATE galleries SET display_order = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(id)
            .bind(display_order)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reorder galleries", e)
            })?;
            updated += result.rows_affected();
        }
        Ok(updated)
    }

    /// Delete `target` and its planned descendants.
    ///
    /// Artworks anywhere in the subtree are detached first, then `plan`
    /// is deleted in order (children before parents), then the target.
    pub async fn delete_subtree(
        &self,
        conn: &mut PgConnection,
        target: Uuid,
        plan: &[Uuid],
    ) -> AppResult<CascadeOutcome> {
        let subtree = subtree_ids(target, plan);

        let detached = sqlx::query(
            "UPDATE artwork_posts SET gallery_id = NULL, updated_at = NOW() \
             WHERE gallery_id = ANY($1)",
        )
        .bind(&subtree)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to detach artworks", e))?
        .rows_affected();

        let mut deleted = 0;
        for id in plan.iter().chain(std::iter::once(&target)) {
            deleted += sqlx::query("DELETE FROM galleries WHERE id = $1")
                .bind(id)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        format!("Failed to delete gallery {id}"),
                        e,
                    )
                })?
                .rows_affected();
        }

        Ok(CascadeOutcome {
            galleries_deleted: deleted,
            artworks_detached: detached,
        })
    }
}

/// Every gallery a cascade delete removes: the target and its plan.
///
/// Artworks in any of these galleries are detached before deletion.
pub fn subtree_ids(target: Uuid, plan: &[Uuid]) -> Vec<Uuid> {
    let mut subtree = Vec::with_capacity(plan.len() + 1);
    subtree.push(target);
    subtree.extend(plan.iter().copied().filter(|id| *id != target));
    subtree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_ids_cover_target_and_plan() {
        let target = Uuid::from_u128(1);
        let plan = [Uuid::from_u128(3), Uuid::from_u128(2), Uuid::from_u128(5)];

        let ids = subtree_ids(target, &plan);
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], target);
        assert!(plan.iter().all(|id| ids.contains(id)));
    }

    #[test]
    fn test_subtree_ids_for_leaf() {
        let target = Uuid::from_u128(7);
        assert_eq!(subtree_ids(target, &[]), vec![target]);
    }
}
