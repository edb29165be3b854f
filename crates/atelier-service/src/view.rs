//! Public views: the serialization boundary for galleries and artworks.
//!
//! Protection flags are derived here from the snapshot and never stored.
//! Locked content (artwork descriptions and images, computed previews)
//! is withheld rather than refused, so listings stay browsable.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use atelier_auth::protection::ProtectionIndex;
use atelier_auth::unlock::UnlockGrant;
use atelier_entity::artwork::{ArtworkImage, ArtworkPost, PreviewCandidate};
use atelier_entity::gallery::Gallery;
use atelier_entity::password::Protected;

/// Who is looking.
#[derive(Debug, Clone, Copy)]
pub enum Viewer<'g> {
    /// An authenticated admin; nothing is locked.
    Admin,
    /// A visitor holding the given unlock grant.
    Visitor(&'g UnlockGrant),
}

impl Viewer<'_> {
    fn gallery_locked(&self, index: &ProtectionIndex<'_>, gallery: &Gallery) -> bool {
        match self {
            Self::Admin => false,
            Self::Visitor(grant) => match index.password_source(gallery) {
                None => false,
                Some(source) => !grant.has_gallery(source),
            },
        }
    }

    fn post_locked(&self, index: &ProtectionIndex<'_>, post: &ArtworkPost) -> bool {
        match self {
            Self::Admin => false,
            Self::Visitor(grant) => !index.is_post_unlocked(post, grant),
        }
    }
}

/// A gallery as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    /// Gallery ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Parent gallery ID.
    pub parent_id: Option<Uuid>,
    /// Explicit cover image.
    pub cover_image_url: Option<String>,
    /// Cover image, or the first image of the first artwork when unlocked.
    pub preview_image_url: Option<String>,
    /// Manual ordering position.
    pub display_order: Option<i32>,
    /// Governed by a password, own or inherited.
    pub password_protected: bool,
    /// Sets a password of its own.
    pub has_own_password: bool,
    /// Protected and not unlocked for this viewer.
    pub locked: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl GalleryView {
    /// Derive the view of `gallery` for `viewer`.
    ///
    /// `previews` maps gallery IDs to their first artwork image.
    pub fn build(
        gallery: &Gallery,
        index: &ProtectionIndex<'_>,
        viewer: Viewer<'_>,
        previews: &HashMap<Uuid, String>,
    ) -> Self {
        let password_protected = index.password_source(gallery).is_some();
        let locked = viewer.gallery_locked(index, gallery);
        let preview_image_url = gallery.cover_image_url.clone().or_else(|| {
            if locked {
                None
            } else {
                previews.get(&gallery.id).cloned()
            }
        });

        Self {
            id: gallery.id,
            name: gallery.name.clone(),
            parent_id: gallery.parent_id,
            cover_image_url: gallery.cover_image_url.clone(),
            preview_image_url,
            display_order: gallery.display_order,
            password_protected,
            has_own_password: gallery.has_own_password(),
            locked,
            created_at: gallery.created_at,
            updated_at: gallery.updated_at,
        }
    }
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    /// Gallery ID.
    pub id: Uuid,
    /// Gallery name.
    pub name: String,
}

/// A gallery page: the gallery, where it sits, and what it contains.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryDetail {
    /// The gallery itself.
    #[serde(flatten)]
    pub gallery: GalleryView,
    /// Root-first names joined by `" > "`.
    pub path: String,
    /// Ancestors, root first.
    pub breadcrumbs: Vec<Crumb>,
    /// Direct child galleries, in display order.
    pub children: Vec<GalleryView>,
}

/// An artwork as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkView {
    /// Artwork ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// HTML description; withheld while locked.
    pub description: Option<String>,
    /// Asking price.
    pub price: Option<f64>,
    /// Containing gallery.
    pub gallery_id: Option<Uuid>,
    /// Featured flag.
    pub is_pinned: bool,
    /// Manual ordering position.
    pub display_order: Option<i32>,
    /// Governed by a password, own or inherited.
    pub password_protected: bool,
    /// Sets a password of its own.
    pub has_own_password: bool,
    /// Protected and not unlocked for this viewer.
    pub locked: bool,
    /// Images, primary first; empty while locked.
    pub images: Vec<ArtworkImage>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl ArtworkView {
    /// Derive the view of `post` for `viewer`.
    pub fn build(
        post: &ArtworkPost,
        images: Vec<ArtworkImage>,
        index: &ProtectionIndex<'_>,
        viewer: Viewer<'_>,
    ) -> Self {
        let locked = viewer.post_locked(index, post);

        Self {
            id: post.id,
            title: post.title.clone(),
            description: if locked { None } else { post.description.clone() },
            price: post.price,
            gallery_id: post.gallery_id,
            is_pinned: post.is_pinned,
            display_order: post.display_order,
            password_protected: index.is_post_protected(post),
            has_own_password: post.has_own_password(),
            locked,
            images: if locked { Vec::new() } else { images },
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Pick each gallery's computed preview from ordered candidates.
///
/// Artworks with a password of their own never supply a preview: their
/// images stay behind their own unlock even inside an open gallery.
pub fn gallery_previews(candidates: Vec<PreviewCandidate>) -> HashMap<Uuid, String> {
    let mut previews = HashMap::new();
    for candidate in candidates {
        if candidate.post_protected {
            continue;
        }
        previews
            .entry(candidate.gallery_id)
            .or_insert(candidate.image_url);
    }
    previews
}

/// Group images by their post, keeping their order.
pub fn images_by_post(images: Vec<ArtworkImage>) -> HashMap<Uuid, Vec<ArtworkImage>> {
    let mut grouped: HashMap<Uuid, Vec<ArtworkImage>> = HashMap::new();
    for image in images {
        grouped.entry(image.post_id).or_default().push(image);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(id: u128, parent: Option<u128>, password: Option<&str>) -> Gallery {
        Gallery {
            id: Uuid::from_u128(id),
            name: format!("g{id}"),
            parent_id: parent.map(Uuid::from_u128),
            password_hash: password.map(str::to_string),
            cover_image_url: None,
            display_order: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn post(gallery: Option<u128>) -> ArtworkPost {
        ArtworkPost {
            id: Uuid::from_u128(100),
            title: "Nocturne".to_string(),
            description: Some("<p>oil on canvas</p>".to_string()),
            price: Some(1200.0),
            gallery_id: gallery.map(Uuid::from_u128),
            password_hash: None,
            is_pinned: false,
            display_order: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn image(post_id: Uuid) -> ArtworkImage {
        ArtworkImage {
            id: Uuid::new_v4(),
            post_id,
            image_url: "/media/a.jpg".to_string(),
            display_order: Some(0),
        }
    }

    #[test]
    fn test_locked_gallery_hides_computed_preview_only() {
        let mut all = vec![gallery(1, None, Some("hash")), gallery(2, Some(1), None)];
        all[0].cover_image_url = Some("/media/cover.jpg".to_string());
        let index = ProtectionIndex::new(&all);
        let previews = HashMap::from([
            (Uuid::from_u128(1), "/media/p1.jpg".to_string()),
            (Uuid::from_u128(2), "/media/p2.jpg".to_string()),
        ]);
        let grant = UnlockGrant::default();

        let root = GalleryView::build(&all[0], &index, Viewer::Visitor(&grant), &previews);
        assert!(root.locked && root.password_protected && root.has_own_password);
        assert_eq!(root.preview_image_url.as_deref(), Some("/media/cover.jpg"));

        let child = GalleryView::build(&all[1], &index, Viewer::Visitor(&grant), &previews);
        assert!(child.locked && child.password_protected && !child.has_own_password);
        assert_eq!(child.preview_image_url, None);

        let admin = GalleryView::build(&all[1], &index, Viewer::Admin, &previews);
        assert!(!admin.locked);
        assert_eq!(admin.preview_image_url.as_deref(), Some("/media/p2.jpg"));
    }

    #[test]
    fn test_locked_artwork_withholds_content() {
        let all = vec![gallery(1, None, Some("hash"))];
        let index = ProtectionIndex::new(&all);
        let p = post(Some(1));
        let images = vec![image(p.id)];

        let nothing = UnlockGrant::default();
        let locked = ArtworkView::build(&p, images.clone(), &index, Viewer::Visitor(&nothing));
        assert!(locked.locked);
        assert!(locked.description.is_none());
        assert!(locked.images.is_empty());
        assert_eq!(locked.title, "Nocturne");

        let mut grant = UnlockGrant::default();
        grant.unlock_gallery(Uuid::from_u128(1));
        let open = ArtworkView::build(&p, images, &index, Viewer::Visitor(&grant));
        assert!(!open.locked && open.password_protected);
        assert_eq!(open.images.len(), 1);
    }

    fn candidate(gallery: u128, url: &str, post_protected: bool) -> PreviewCandidate {
        PreviewCandidate {
            gallery_id: Uuid::from_u128(gallery),
            image_url: url.to_string(),
            post_protected,
        }
    }

    #[test]
    fn test_protected_artwork_never_supplies_gallery_preview() {
        let all = vec![gallery(1, None, None)];
        let index = ProtectionIndex::new(&all);
        let mut guarded = post(Some(1));
        guarded.password_hash = Some("$argon2id$own".to_string());

        let previews = gallery_previews(vec![candidate(1, "/media/secret.jpg", true)]);
        let grant = UnlockGrant::default();

        let artwork = ArtworkView::build(
            &guarded,
            vec![image(guarded.id)],
            &index,
            Viewer::Visitor(&grant),
        );
        assert!(artwork.locked && artwork.images.is_empty());

        let view = GalleryView::build(&all[0], &index, Viewer::Visitor(&grant), &previews);
        assert!(!view.locked);
        assert_eq!(view.preview_image_url, None);
    }

    #[test]
    fn test_preview_falls_through_to_first_open_artwork() {
        let previews = gallery_previews(vec![
            candidate(1, "/media/secret.jpg", true),
            candidate(1, "/media/open.jpg", false),
            candidate(1, "/media/later.jpg", false),
            candidate(2, "/media/other.jpg", false),
        ]);
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[&Uuid::from_u128(1)], "/media/open.jpg");
        assert_eq!(previews[&Uuid::from_u128(2)], "/media/other.jpg");
    }

    #[test]
    fn test_views_never_serialize_password() {
        let all = vec![gallery(1, None, Some("$argon2id$secret"))];
        let index = ProtectionIndex::new(&all);
        let view = GalleryView::build(&all[0], &index, Viewer::Admin, &HashMap::new());
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("\"password\""));
        assert!(json.contains("\"password_protected\":true"));
    }
}
