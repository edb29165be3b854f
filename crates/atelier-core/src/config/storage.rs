//! Artwork image storage configuration.

use serde::{Deserialize, Serialize};

/// Object storage configuration for artwork images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the local object store.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// URL prefix under which stored objects are publicly served.
    /// Image URLs starting with this prefix are owned by the store and
    /// are deleted together with their artwork.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl StorageConfig {
    /// Map a public image URL to its object key, if the store owns it.
    pub fn object_key_for(&self, image_url: &str) -> Option<String> {
        let base = self.public_base_url.trim_end_matches('/');
        image_url
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}

fn default_root_path() -> String {
    "./data/media".to_string()
}

fn default_public_base_url() -> String {
    "/media".to_string()
}
