//! Cache persistence
//!
//! Loads and saves the `DependencyCache` document. A malformed file is
//! recovered by starting from an empty cache; a crash mid-write never
//! leaves a torn file because saves go through a temp file and rename.

use crate::cache::model::DependencyCache;
use crate::error::{RepinError, RepinResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// File name of the cache document inside the cache directory
pub const CACHE_FILE: &str = "dependency-cache.json";

/// Persists the dependency cache under a directory
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Open a store, creating the cache directory.
    ///
    /// An unusable directory is the one hard failure in the cache
    /// layer: nothing can make progress without it.
    pub async fn open(dir: impl Into<PathBuf>) -> RepinResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| RepinError::CacheDirUnusable {
                path: dir.clone(),
                source: e,
            })?;
        Ok(Self { dir })
    }

    /// Cache directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file
    pub fn cache_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE)
    }

    /// Load the persisted cache.
    ///
    /// A missing file yields an empty cache. A malformed file is
    /// logged and also yields an empty cache; the next save rebuilds
    /// it. This never returns an error.
    pub async fn load(&self) -> DependencyCache {
        let path = self.cache_path();

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cache file at {}, starting empty", path.display());
                return DependencyCache::default();
            }
            Err(e) => {
                warn!("Failed to read cache file {}: {}", path.display(), e);
                return DependencyCache::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(
                    "Corrupt cache file {} ({}), recreating from scratch",
                    path.display(),
                    e
                );
                DependencyCache::default()
            }
        }
    }

    /// Persist the cache atomically (write to temp, rename over).
    pub async fn save(&self, cache: &DependencyCache) -> RepinResult<()> {
        let path = self.cache_path();
        let tmp = self.dir.join(format!("{}.tmp", CACHE_FILE));

        let content = serde_json::to_string_pretty(cache)?;
        fs::write(&tmp, content)
            .await
            .map_err(|e| RepinError::CachePersist {
                path: tmp.clone(),
                reason: e.to_string(),
            })?;

        fs::rename(&tmp, &path)
            .await
            .map_err(|e| RepinError::CachePersist {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!("Saved dependency cache to {}", path.display());
        Ok(())
    }

    /// Remove the cache file entirely
    pub async fn delete(&self) -> RepinResult<()> {
        let path = self.cache_path();
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepinError::io(
                format!("removing cache file {}", path.display()),
                e,
            )),
        }
    }
}
