//! Public media URLs mapped onto a storage provider.

use std::sync::Arc;

use tracing::{debug, warn};

use atelier_core::config::StorageConfig;
use atelier_core::result::AppResult;
use atelier_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};

/// Artwork image objects addressed by their public URL.
///
/// Only URLs under the configured `public_base_url` belong to the store;
/// external image URLs are referenced but never touched.
#[derive(Debug, Clone)]
pub struct MediaStore {
    provider: Arc<dyn StorageProvider>,
    config: StorageConfig,
}

impl MediaStore {
    /// Bind a provider to the public URL scheme in `config`.
    pub fn new(provider: Arc<dyn StorageProvider>, config: StorageConfig) -> Self {
        Self { provider, config }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Public URL of an object key.
    pub fn url_for(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }

    /// Open an object for streaming, with its metadata.
    pub async fn open(&self, key: &str) -> AppResult<(StorageObjectMeta, ByteStream)> {
        let meta = self.provider.metadata(key).await?;
        let stream = self.provider.read(key).await?;
        Ok((meta, stream))
    }

    /// Delete the stored objects behind `urls`.
    ///
    /// Failures are logged and skipped: the database rows are already gone,
    /// so a leftover file is preferable to failing the request. Returns the
    /// number of owned objects that are now gone.
    pub async fn delete_urls(&self, urls: &[String]) -> usize {
        let mut removed = 0;
        for url in urls {
            let Some(key) = self.config.object_key_for(url) else {
                debug!(url = %url, "Image URL not owned by the media store, skipping");
                continue;
            };
            match self.provider.delete(&key).await {
                Ok(()) => removed += 1,
                Err(e) => warn!(key = %key, error = %e, "Failed to delete image object"),
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::providers::local::LocalStorageProvider;

    async fn store() -> (tempfile::TempDir, MediaStore) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let config = StorageConfig {
            root_path: dir.path().to_string_lossy().into_owned(),
            public_base_url: "/media/".to_string(),
        };
        (dir, MediaStore::new(Arc::new(provider), config))
    }

    #[tokio::test]
    async fn test_delete_urls_skips_foreign_urls() {
        let (_dir, store) = store().await;
        store
            .provider()
            .write("artworks/one.jpg", Bytes::from("1"))
            .await
            .unwrap();

        let removed = store
            .delete_urls(&[
                store.url_for("artworks/one.jpg"),
                "https://cdn.example.com/two.jpg".to_string(),
                store.url_for("artworks/missing.jpg"),
            ])
            .await;

        assert_eq!(removed, 2);
        assert!(!store.provider().exists("artworks/one.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_url_round_trip() {
        let (_dir, store) = store().await;
        assert_eq!(store.url_for("/a/b.png"), "/media/a/b.png");
        store.provider().write("a/b.png", Bytes::from("png")).await.unwrap();
        let (meta, _stream) = store.open("a/b.png").await.unwrap();
        assert_eq!(meta.size_bytes, 3);
    }
}
