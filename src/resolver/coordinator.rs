//! Resolution coordination
//!
//! Decides per module whether a resolver call is needed, runs changed
//! modules through the resolver under a bounded worker pool, merges
//! per-module results with cached ones, and persists the cache. The
//! merge and the cache write happen on this task after all workers
//! finish, so the cache only ever sees fully-computed passes.

use crate::cache::{CacheStore, DependencyCache, ModuleCacheEntry, PackageSet};
use crate::error::{RepinError, RepinResult};
use crate::hash;
use crate::resolver::capability::Resolver;
use crate::resolver::hooks::ResolverHooks;
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Default number of concurrent resolver calls
pub const DEFAULT_JOBS: usize = 4;

/// Outcome of one resolution pass
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Merged pinned package set across all modules
    pub packages: PackageSet,

    /// Modules whose resolver call failed this pass; their prior
    /// cache entries (if any) were retained
    pub failed_modules: Vec<String>,

    /// True when no module changed and nothing was resolved; callers
    /// can skip the install step
    pub cache_hit: bool,
}

/// Orchestrates incremental resolution over the module cache
pub struct ResolutionCoordinator {
    store: CacheStore,
    resolver: Arc<dyn Resolver>,
    hooks: ResolverHooks,
    jobs: usize,
    module_timeout: Option<Duration>,
}

impl ResolutionCoordinator {
    /// Create a coordinator with default concurrency and no hooks
    pub fn new(store: CacheStore, resolver: Arc<dyn Resolver>) -> Self {
        Self {
            store,
            resolver,
            hooks: ResolverHooks::default(),
            jobs: DEFAULT_JOBS,
            module_timeout: None,
        }
    }

    /// Attach lifecycle hooks
    pub fn with_hooks(mut self, hooks: ResolverHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Set the bounded worker pool size (minimum 1)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Apply a timeout to each module's resolver call. A timed-out
    /// module takes the same path as a failed one.
    pub fn with_module_timeout(mut self, timeout: Duration) -> Self {
        self.module_timeout = Some(timeout);
        self
    }

    /// Hooks configured on this coordinator (used by the installer)
    pub fn hooks(&self) -> &ResolverHooks {
        &self.hooks
    }

    /// Resolve the given module requirement texts incrementally.
    ///
    /// Modules whose text hash matches their cache entry are served
    /// from the cache; the rest go through the resolver. A failing
    /// module keeps its last-good entry and is reported in
    /// `failed_modules` without aborting the pass. Failure to persist
    /// the cache afterwards is logged as a warning; the in-memory
    /// result is still returned.
    pub async fn resolve(
        &self,
        module_requirements: &BTreeMap<String, String>,
    ) -> RepinResult<Resolution> {
        let mut cache = self.store.load().await;
        let prev_combined = cache.combined_hash.clone();

        let environment_hash = self.environment_hash(&cache).await;
        let environment_changed = environment_hash != cache.environment_hash;
        if environment_changed && !cache.is_empty() {
            info!("Resolver environment changed, re-resolving all modules");
        }

        // Classify each module as unchanged (hash matches its cache
        // entry) or changed (new module, modified text, or stale
        // environment).
        let mut changed: Vec<(String, String, String)> = Vec::new();
        for (name, text) in module_requirements {
            let module_hash = hash::digest(text);
            let unchanged = !environment_changed
                && cache
                    .module_caches
                    .get(name)
                    .is_some_and(|entry| entry.hash == module_hash);

            if unchanged {
                debug!("Module '{}' unchanged, using cached packages", name);
            } else {
                debug!("Module '{}' changed, will resolve", name);
                changed.push((name.clone(), text.clone(), module_hash));
            }
        }

        for (name, text, _) in &changed {
            self.hooks.fire_pre_resolve(name, text);
        }

        let mut failed_modules = Vec::new();
        if !changed.is_empty() {
            info!(
                "Resolving {} changed module(s) of {}",
                changed.len(),
                module_requirements.len()
            );

            let results = self.resolve_changed(&changed).await;
            for (name, module_hash, result) in results {
                match result {
                    Ok(packages) => {
                        self.hooks.fire_post_resolve(&name, &packages);
                        cache
                            .module_caches
                            .insert(name, ModuleCacheEntry::new(module_hash, packages));
                    }
                    Err(e) => {
                        warn!("{}", e);
                        if cache.module_caches.contains_key(&name) {
                            warn!("Keeping last-good cache entry for module '{}'", name);
                        }
                        failed_modules.push(name);
                    }
                }
            }
            failed_modules.sort();
        }

        let new_combined = cache.remerge();

        // Full cache hit: nothing was resolved, nothing failed, the
        // combined hash matches what was persisted, and the environment
        // fingerprint is current. Skip the save so timestamps stay
        // untouched. A stale fingerprint falls through to the save even
        // when no module needed resolving, so it is recorded.
        if changed.is_empty()
            && failed_modules.is_empty()
            && new_combined == prev_combined
            && !environment_changed
        {
            debug!("Full cache hit, combined hash {}", short(&new_combined));
            return Ok(Resolution {
                packages: cache.resolved_packages,
                failed_modules,
                cache_hit: true,
            });
        }

        cache.environment_hash = environment_hash;
        cache.last_updated = Some(Utc::now());

        if let Err(e) = self.store.save(&cache).await {
            warn!("Resolution succeeded but cache could not be saved: {}", e);
        }

        Ok(Resolution {
            packages: cache.resolved_packages,
            failed_modules,
            cache_hit: false,
        })
    }

    /// Run resolver calls for changed modules under the bounded pool
    async fn resolve_changed(
        &self,
        changed: &[(String, String, String)],
    ) -> Vec<(String, String, RepinResult<PackageSet>)> {
        stream::iter(changed.iter().cloned())
            .map(|(name, text, module_hash)| {
                let resolver = Arc::clone(&self.resolver);
                let module_timeout = self.module_timeout;
                async move {
                    let result = match module_timeout {
                        Some(limit) => match timeout(limit, resolver.resolve(&text)).await {
                            Ok(result) => result,
                            Err(_) => Err(RepinError::ModuleTimeout {
                                module: name.clone(),
                                seconds: limit.as_secs(),
                            }),
                        },
                        None => resolver.resolve(&text).await,
                    };
                    let result = result.map_err(|e| match e {
                        e @ RepinError::ModuleTimeout { .. } => e,
                        e @ RepinError::ModuleResolve { .. } => e,
                        e => RepinError::module_resolve(&name, e.to_string()),
                    });
                    (name, module_hash, result)
                }
            })
            .buffer_unordered(self.jobs)
            .collect()
            .await
    }

    /// Digest of the resolver's environment fingerprint.
    ///
    /// If the resolver cannot report one, the stored value is kept so
    /// a transient query failure does not invalidate the whole cache.
    async fn environment_hash(&self, cache: &DependencyCache) -> String {
        match self.resolver.environment().await {
            Ok(fingerprint) if fingerprint.is_empty() => String::new(),
            Ok(fingerprint) => hash::digest(&fingerprint),
            Err(e) => {
                warn!("Could not query resolver environment: {}", e);
                cache.environment_hash.clone()
            }
        }
    }
}

fn short(hash: &str) -> &str {
    &hash[..hash.len().min(12)]
}
