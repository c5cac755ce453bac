//! Cache administration
//!
//! Invalidation and introspection on top of `CacheStore`. Module
//! invalidation removes one entry and recomputes the derived state so
//! the invariants of `DependencyCache` hold after the save.

use crate::cache::model::DependencyCache;
use crate::cache::store::CacheStore;
use crate::error::RepinResult;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Summary of the persisted cache for display
#[derive(Debug, Clone)]
pub struct CacheInfo {
    pub module_count: usize,
    pub package_count: usize,
    pub combined_hash: String,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Administrative operations on the dependency cache
pub struct CacheAdmin<'a> {
    store: &'a CacheStore,
}

impl<'a> CacheAdmin<'a> {
    pub fn new(store: &'a CacheStore) -> Self {
        Self { store }
    }

    /// Drop every module entry and all derived state
    pub async fn invalidate_all(&self) -> RepinResult<()> {
        let mut cache = self.store.load().await;
        cache.clear();
        self.store.save(&cache).await?;
        info!("Invalidated entire dependency cache");
        Ok(())
    }

    /// Drop one module's entry and recompute the merge.
    ///
    /// Invalidating a module that is not cached is a no-op. Returns
    /// whether an entry was removed.
    pub async fn invalidate_module(&self, name: &str) -> RepinResult<bool> {
        let mut cache = self.store.load().await;

        if cache.module_caches.remove(name).is_none() {
            debug!("Module '{}' not in cache, nothing to invalidate", name);
            return Ok(false);
        }

        cache.remerge();
        cache.last_updated = Some(Utc::now());
        self.store.save(&cache).await?;
        info!("Invalidated cache for module '{}'", name);
        Ok(true)
    }

    /// Summarize the current cache contents
    pub async fn info(&self) -> CacheInfo {
        let cache = self.store.load().await;
        CacheInfo {
            module_count: cache.module_caches.len(),
            package_count: cache.resolved_packages.len(),
            combined_hash: cache.combined_hash.clone(),
            last_updated: cache.last_updated,
        }
    }

    /// Load the raw cache document (for `check` and friends)
    pub async fn load(&self) -> DependencyCache {
        self.store.load().await
    }
}
