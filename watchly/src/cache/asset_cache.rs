use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use watchly_common::{AssetKey, GalleryError, GalleryResult};

use crate::remote::BlobStore;

/// Distinguishes temp files of concurrent writers within this process
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write-once disk cache in front of a remote blob store.
/// Each key is stored as one flat file in the cache directory.
/// Clones share the directory and the remote store.
#[derive(Clone)]
pub struct AssetCache {
    cache_dir: PathBuf,
    remote: Arc<dyn BlobStore>,
    max_size: usize,
}

impl AssetCache {
    /// Create a new asset cache, creating the directory if needed
    pub fn new(cache_dir: impl Into<PathBuf>, remote: Arc<dyn BlobStore>, max_size: usize) -> Self {
        let cache_dir = cache_dir.into();

        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            log::warn!("Failed to create asset cache directory: {}", e);
        } else {
            log::info!("Asset cache directory: {:?}", cache_dir);
        }

        Self {
            cache_dir,
            remote,
            max_size,
        }
    }

    /// Get the full path for a cached asset
    pub fn path(&self, key: &AssetKey) -> PathBuf {
        self.cache_dir.join(key.cache_file_name())
    }

    /// Check if an asset is cached
    pub async fn contains(&self, key: &AssetKey) -> bool {
        is_file(&self.path(key)).await
    }

    /// Get a cached asset
    pub async fn get(&self, key: &AssetKey) -> Option<Vec<u8>> {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => {
                log::debug!("Asset cache hit for {}", key);
                Some(bytes)
            }
            Err(_) => None,
        }
    }

    /// Store an asset unless a copy already exists.
    ///
    /// The bytes go to a temp file first and are renamed into place, so
    /// readers never observe a partial file.
    pub async fn insert(&self, key: &AssetKey, bytes: &[u8]) -> GalleryResult<()> {
        let path = self.path(key);
        if is_file(&path).await {
            log::debug!("Asset {} already cached, not rewriting", key);
            return Ok(());
        }

        let temp = self.cache_dir.join(format!(
            ".{}.{}.{}.tmp",
            key.cache_file_name(),
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = tokio::fs::write(&temp, bytes).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        log::debug!("Cached asset {} ({} bytes)", key, bytes.len());
        Ok(())
    }

    /// Resolve an asset, reporting why it is unavailable.
    ///
    /// Local copies are served without revalidation. On a miss the remote is
    /// asked exactly once; persisting the result is best-effort.
    pub async fn try_resolve(&self, key: &AssetKey) -> GalleryResult<Vec<u8>> {
        if key.is_bundled() {
            log::debug!("Asset {} is bundled, skipping cache", key);
            return Err(GalleryError::NotFound(key.to_string()));
        }
        if !key.has_cache_file_name() {
            log::debug!("Asset key {:?} has no usable file name", key.as_str());
            return Err(GalleryError::NotFound(key.to_string()));
        }

        if let Some(bytes) = self.get(key).await {
            return Ok(bytes);
        }

        log::info!("Asset cache miss for {}, fetching from storage", key);
        let bytes = self.remote.get_data(key.as_str(), self.max_size).await?;

        if image::guess_format(&bytes).is_err() {
            return Err(GalleryError::InvalidImage(key.to_string()));
        }

        if let Err(e) = self.insert(key, &bytes).await {
            log::warn!("Failed to cache asset {}: {}", key, e);
        }

        Ok(bytes)
    }

    /// Resolve an asset; `None` means the caller shows a placeholder
    pub async fn resolve(&self, key: &AssetKey) -> Option<Vec<u8>> {
        match self.try_resolve(key).await {
            Ok(bytes) => Some(bytes),
            Err(e) if key.is_bundled() => {
                log::debug!("{}", e);
                None
            }
            Err(e) if e.is_not_found() => {
                log::info!("{}", e);
                None
            }
            Err(e) => {
                log::warn!("Failed to resolve asset {}: {}", key, e);
                None
            }
        }
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
