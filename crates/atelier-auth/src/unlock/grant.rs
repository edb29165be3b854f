//! The set of unlocked galleries and artworks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Galleries and artworks a visitor has unlocked.
///
/// Only galleries with their own password are ever recorded; inheriting
/// descendants are resolved through the protection index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockGrant {
    /// Unlocked gallery IDs.
    #[serde(default)]
    pub galleries: BTreeSet<Uuid>,
    /// Unlocked artwork IDs.
    #[serde(default)]
    pub posts: BTreeSet<Uuid>,
}

impl UnlockGrant {
    /// Record an unlocked gallery.
    pub fn unlock_gallery(&mut self, id: Uuid) {
        self.galleries.insert(id);
    }

    /// Record an unlocked artwork.
    pub fn unlock_post(&mut self, id: Uuid) {
        self.posts.insert(id);
    }

    /// Whether the gallery itself was unlocked.
    pub fn has_gallery(&self, id: Uuid) -> bool {
        self.galleries.contains(&id)
    }

    /// Whether the artwork itself was unlocked.
    pub fn has_post(&self, id: Uuid) -> bool {
        self.posts.contains(&id)
    }

    /// Whether nothing is unlocked.
    pub fn is_empty(&self) -> bool {
        self.galleries.is_empty() && self.posts.is_empty()
    }
}
