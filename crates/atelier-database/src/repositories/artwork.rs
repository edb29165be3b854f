//! Artwork repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_core::types::pagination::{PageRequest, PageResponse};
use atelier_entity::artwork::{
    ArtworkImage, ArtworkPost, CreateArtwork, NewArtworkImage, PreviewCandidate, UpdateArtwork,
};

const ORDER_BY: &str = "ORDER BY display_order ASC NULLS LAST, created_at DESC";

/// Repository for artwork posts and their images.
#[derive(Debug, Clone)]
pub struct ArtworkRepository {
    pool: PgPool,
}

impl ArtworkRepository {
    /// Create a new artwork repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The pool this repository runs on.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find an artwork by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ArtworkPost>> {
        sqlx::query_as::<_, ArtworkPost>("SELECT * FROM artwork_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find artwork", e))
    }

    /// List artworks, optionally restricted to one gallery.
    pub async fn list(
        &self,
        gallery_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ArtworkPost>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM artwork_posts WHERE ($1::uuid IS NULL OR gallery_id = $1)",
        )
        .bind(gallery_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count artworks", e))?;

        let artworks = sqlx::query_as::<_, ArtworkPost>(&format!(
            "SELECT * FROM artwork_posts WHERE ($1::uuid IS NULL OR gallery_id = $1) \
             {ORDER_BY} LIMIT $2 OFFSET $3"
        ))
        .bind(gallery_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list artworks", e))?;

        Ok(PageResponse::new(
            artworks,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// All artworks in one gallery, in display order.
    pub async fn find_by_gallery(&self, gallery_id: Uuid) -> AppResult<Vec<ArtworkPost>> {
        sqlx::query_as::<_, ArtworkPost>(&format!(
            "SELECT * FROM artwork_posts WHERE gallery_id = $1 {ORDER_BY}"
        ))
        .bind(gallery_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list gallery artworks", e)
        })
    }

    /// Pinned artworks, in display order.
    pub async fn find_featured(&self, limit: i64) -> AppResult<Vec<ArtworkPost>> {
        sqlx::query_as::<_, ArtworkPost>(&format!(
            "SELECT * FROM artwork_posts WHERE is_pinned {ORDER_BY} LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list featured", e))
    }

    /// Images of one artwork, primary first.
    pub async fn images_for(&self, post_id: Uuid) -> AppResult<Vec<ArtworkImage>> {
        self.images_for_posts(&[post_id]).await
    }

    /// Images of several artworks, grouped by post and primary first.
    pub async fn images_for_posts(&self, post_ids: &[Uuid]) -> AppResult<Vec<ArtworkImage>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, ArtworkImage>(
            "SELECT * FROM artwork_images WHERE post_id = ANY($1) \
             ORDER BY post_id, display_order ASC NULLS LAST, id",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list images", e))
    }

    /// The primary image of every illustrated artwork that sits in a
    /// gallery, in artwork display order.
    pub async fn preview_candidates(&self) -> AppResult<Vec<PreviewCandidate>> {
        sqlx::query_as::<_, PreviewCandidate>(
            "SELECT gallery_id, image_url, post_protected FROM ( \
                 SELECT DISTINCT ON (p.id) p.gallery_id, i.image_url, \
                        (p.password_hash IS NOT NULL AND p.password_hash <> '') AS post_protected, \
                        p.display_order, p.created_at \
                 FROM artwork_posts p \
                 INNER JOIN artwork_images i ON i.post_id = p.id \
                 WHERE p.gallery_id IS NOT NULL \
                 ORDER BY p.id, i.display_order ASC NULLS LAST, i.id \
             ) primary_images \
             ORDER BY gallery_id, display_order ASC NULLS LAST, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load gallery previews", e)
        })
    }

    /// Insert an artwork and its images.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        data: &CreateArtwork,
    ) -> AppResult<(ArtworkPost, Vec<ArtworkImage>)> {
        let post = sqlx::query_as::<_, ArtworkPost>(
            "INSERT INTO artwork_posts \
             (title, description, price, gallery_id, password_hash, is_pinned, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.gallery_id)
        .bind(&data.password_hash)
        .bind(data.is_pinned)
        .bind(data.display_order)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create artwork", e))?;

        let images = insert_images(conn, post.id, &data.images).await?;
        Ok((post, images))
    }

    /// Replace an artwork's fields, and its images when supplied.
    ///
    /// Returns the updated post, its images, and the URLs of images that
    /// were removed by the replacement.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        data: &UpdateArtwork,
    ) -> AppResult<(ArtworkPost, Vec<ArtworkImage>, Vec<String>)> {
        let post = sqlx::query_as::<_, ArtworkPost>(
            "UPDATE artwork_posts SET title = $2, description = $3, price = $4, \
             gallery_id = $5, password_hash = $6, is_pinned = $7, display_order = $8, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.gallery_id)
        .bind(&data.password_hash)
        .bind(data.is_pinned)
        .bind(data.display_order)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update artwork", e))?
        .ok_or_else(|| AppError::not_found(format!("Artwork {id} not found")))?;

        let Some(new_images) = &data.images else {
            let images = sqlx::query_as::<_, ArtworkImage>(
                "SELECT * FROM artwork_images WHERE post_id = $1 \
                 ORDER BY display_order ASC NULLS LAST, id",
            )
            .bind(id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list images", e))?;
            return Ok((post, images, Vec::new()));
        };

        let old_urls: Vec<String> =
            sqlx::query_scalar("DELETE FROM artwork_images WHERE post_id = $1 RETURNING image_url")
                .bind(id)
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to replace images", e)
                })?;

        let images = insert_images(conn, id, new_images).await?;
        let removed = old_urls
            .into_iter()
            .filter(|url| !images.iter().any(|i| &i.image_url == url))
            .collect();

        Ok((post, images, removed))
    }

    /// Delete an artwork; its image rows go with it.
    ///
    /// Returns the URLs of the deleted images, or `None` if the artwork
    /// did not exist.
    pub async fn delete(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<Vec<String>>> {
        let urls: Vec<String> = sqlx::query_scalar(
            "SELECT image_url FROM artwork_images WHERE post_id = $1 \
             ORDER BY display_order ASC NULLS LAST",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list images", e))?;

        let result = sqlx::query("DELETE FROM artwork_posts WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete artwork", e)
            })?;

        Ok((result.rows_affected() > 0).then_some(urls))
    }

    /// Apply new image positions within one artwork.
    ///
    /// Image IDs that do not belong to `post_id` are left untouched.
    pub async fn reorder_images(
        &self,
        conn: &mut PgConnection,
        post_id: Uuid,
        order: &[(Uuid, i32)],
    ) -> AppResult<u64> {
        let mut updated = 0;
        for (image_id, display_order) in order {
            updated += sqlx::query(
                "UPDATE artwork_images SET display_order = $3 WHERE id = $1 AND post_id = $2",
            )
            .bind(image_id)
            .bind(post_id)
            .bind(display_order)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reorder images", e))?
            .rows_affected();
        }
        Ok(updated)
    }
}

async fn insert_images(
    conn: &mut PgConnection,
    post_id: Uuid,
    images: &[NewArtworkImage],
) -> AppResult<Vec<ArtworkImage>> {
    let mut stored = Vec::with_capacity(images.len());
    for (position, image) in images.iter().enumerate() {
        let display_order = image.display_order.unwrap_or(position as i32);
        let row = sqlx::query_as::<_, ArtworkImage>(
            "INSERT INTO artwork_images (post_id, image_url, display_order) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(post_id)
        .bind(&image.image_url)
        .bind(display_order)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store image", e))?;
        stored.push(row);
    }
    Ok(stored)
}
