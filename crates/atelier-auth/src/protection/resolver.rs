//! Effective-password resolution over a gallery snapshot.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use atelier_entity::artwork::ArtworkPost;
use atelier_entity::gallery::Gallery;
use atelier_entity::password::Protected;

use crate::unlock::UnlockGrant;

/// Galleries indexed by ID for repeated protection lookups.
///
/// Build one per request snapshot; every lookup walks `parent_id` links
/// through the index and stops at a missing record or a revisited gallery.
#[derive(Debug, Clone)]
pub struct ProtectionIndex<'a> {
    by_id: HashMap<Uuid, &'a Gallery>,
}

impl<'a> ProtectionIndex<'a> {
    /// Index a snapshot of all galleries.
    pub fn new(all: &'a [Gallery]) -> Self {
        Self {
            by_id: all.iter().map(|g| (g.id, g)).collect(),
        }
    }

    /// Look up a gallery in the snapshot.
    pub fn gallery(&self, id: Uuid) -> Option<&'a Gallery> {
        self.by_id.get(&id).copied()
    }

    /// The gallery whose own password governs `gallery`: itself, or its
    /// nearest protected ancestor.
    pub fn governing(&self, gallery: &'a Gallery) -> Option<&'a Gallery> {
        let mut seen = HashSet::new();
        let mut cursor = Some(gallery);

        while let Some(current) = cursor {
            if !seen.insert(current.id) {
                return None;
            }
            if current.has_own_password() {
                return Some(current);
            }
            cursor = current.parent_id.and_then(|id| self.gallery(id));
        }

        None
    }

    /// Effective password credential of a gallery.
    pub fn effective_password(&self, gallery: &'a Gallery) -> Option<&'a str> {
        self.governing(gallery).and_then(|g| g.own_password())
    }

    /// ID of the gallery whose own password is the effective one.
    pub fn password_source(&self, gallery: &'a Gallery) -> Option<Uuid> {
        self.governing(gallery).map(|g| g.id)
    }

    /// Effective password credential of an artwork.
    pub fn effective_password_for_post(&self, post: &'a ArtworkPost) -> Option<&'a str> {
        if let Some(own) = post.own_password() {
            return Some(own);
        }
        post.gallery_id
            .and_then(|id| self.gallery(id))
            .and_then(|g| self.effective_password(g))
    }

    /// Whether a gallery is governed by any password.
    pub fn is_gallery_protected(&self, gallery: &'a Gallery) -> bool {
        self.effective_password(gallery).is_some()
    }

    /// Whether an artwork is governed by any password.
    pub fn is_post_protected(&self, post: &ArtworkPost) -> bool {
        post.has_own_password()
            || post
                .gallery_id
                .and_then(|id| self.gallery(id))
                .is_some_and(|g| self.is_gallery_protected(g))
    }

    /// Whether a visitor holding `grant` may see the gallery's content.
    pub fn is_gallery_unlocked(&self, gallery: &'a Gallery, grant: &UnlockGrant) -> bool {
        match self.password_source(gallery) {
            None => true,
            Some(source) => grant.has_gallery(source),
        }
    }

    /// Whether a visitor holding `grant` may see the artwork's content.
    pub fn is_post_unlocked(&self, post: &ArtworkPost, grant: &UnlockGrant) -> bool {
        if post.has_own_password() {
            return grant.has_post(post.id);
        }
        match post.gallery_id.and_then(|id| self.gallery(id)) {
            Some(gallery) => self.is_gallery_unlocked(gallery, grant),
            None => true,
        }
    }
}

/// Effective password of `gallery` within the snapshot `all`.
pub fn effective_password<'a>(gallery: &'a Gallery, all: &'a [Gallery]) -> Option<&'a str> {
    ProtectionIndex::new(all).effective_password(gallery)
}

/// Effective password of `post` within the snapshot `all`.
pub fn effective_password_for_post<'a>(
    post: &'a ArtworkPost,
    all: &'a [Gallery],
) -> Option<&'a str> {
    ProtectionIndex::new(all).effective_password_for_post(post)
}

/// ID of the gallery whose own password governs `gallery`.
pub fn password_source(gallery: &Gallery, all: &[Gallery]) -> Option<Uuid> {
    ProtectionIndex::new(all).password_source(gallery)
}

/// Whether `gallery` is protected, directly or by inheritance.
pub fn is_gallery_password_protected(gallery: &Gallery, all: &[Gallery]) -> bool {
    effective_password(gallery, all).is_some()
}

/// Whether `post` is protected, directly or through its gallery.
pub fn is_post_password_protected(post: &ArtworkPost, all: &[Gallery]) -> bool {
    effective_password_for_post(post, all).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    fn post(id: u128, gallery: Option<u128>, password: Option<&str>) -> ArtworkPost {
        ArtworkPost {
            id: Uuid::from_u128(id),
            title: format!("p{id}"),
            description: None,
            price: None,
            gallery_id: gallery.map(Uuid::from_u128),
            password_hash: password.map(str::to_string),
            is_pinned: false,
            display_order: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// A("secret") -> B -> C
    fn chain() -> Vec<Gallery> {
        vec![
            gallery(1, None, Some("secret")),
            gallery(2, Some(1), None),
            gallery(3, Some(2), None),
        ]
    }

    #[test]
    fn test_inherits_from_root() {
        let all = chain();
        assert_eq!(effective_password(&all[2], &all), Some("secret"));
        assert!(is_gallery_password_protected(&all[1], &all));
        assert!(!all[2].has_own_password());
        assert_eq!(password_source(&all[2], &all), Some(Uuid::from_u128(1)));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let mut all = chain();
        all[1].password_hash = Some("inner".to_string());
        assert_eq!(effective_password(&all[2], &all), Some("inner"));
        assert_eq!(effective_password(&all[0], &all), Some("secret"));
    }

    #[test]
    fn test_empty_string_means_unprotected() {
        let all = vec![gallery(1, None, Some("")), gallery(2, Some(1), None)];
        assert_eq!(effective_password(&all[1], &all), None);
        assert!(!is_gallery_password_protected(&all[0], &all));
    }

    #[test]
    fn test_broken_chain_is_unprotected() {
        let all = vec![gallery(2, Some(99), None)];
        assert_eq!(effective_password(&all[0], &all), None);
    }

    #[test]
    fn test_stored_cycle_terminates() {
        let all = vec![gallery(1, Some(2), None), gallery(2, Some(1), None)];
        assert_eq!(effective_password(&all[0], &all), None);
    }

    #[test]
    fn test_post_resolution() {
        let all = chain();
        let own = post(10, Some(3), Some("mine"));
        let inherited = post(11, Some(3), None);
        let orphan = post(12, None, None);
        let dangling = post(13, Some(99), None);

        assert_eq!(effective_password_for_post(&own, &all), Some("mine"));
        assert_eq!(effective_password_for_post(&inherited, &all), Some("secret"));
        assert!(!is_post_password_protected(&orphan, &all));
        assert!(!is_post_password_protected(&dangling, &all));
    }

    #[test]
    fn test_unlocking_root_unlocks_inheriting_descendants() {
        let mut all = chain();
        all.push(gallery(4, Some(2), Some("own")));
        let index = ProtectionIndex::new(&all);

        let mut grant = UnlockGrant::default();
        assert!(!index.is_gallery_unlocked(&all[2], &grant));

        grant.unlock_gallery(Uuid::from_u128(1));
        assert!(index.is_gallery_unlocked(&all[0], &grant));
        assert!(index.is_gallery_unlocked(&all[2], &grant));
        assert!(!index.is_gallery_unlocked(&all[3], &grant));
    }

    #[test]
    fn test_post_with_own_password_needs_own_unlock() {
        let all = chain();
        let index = ProtectionIndex::new(&all);
        let own = post(10, Some(3), Some("mine"));
        let inherited = post(11, Some(3), None);

        let mut grant = UnlockGrant::default();
        grant.unlock_gallery(Uuid::from_u128(1));
        assert!(index.is_post_unlocked(&inherited, &grant));
        assert!(!index.is_post_unlocked(&own, &grant));

        grant.unlock_post(own.id);
        assert!(index.is_post_unlocked(&own, &grant));
    }

    #[test]
    fn test_unprotected_content_is_always_unlocked() {
        let all = vec![gallery(1, None, None)];
        let index = ProtectionIndex::new(&all);
        let grant = UnlockGrant::default();
        assert!(index.is_gallery_unlocked(&all[0], &grant));
        assert!(index.is_post_unlocked(&post(5, None, None), &grant));
    }
}
