//! Persisted cache structures
//!
//! `DependencyCache` is the root document written to disk. Each module
//! owns one `ModuleCacheEntry`; `resolved_packages` and `combined_hash`
//! are always recomputed together from the current entries so the two
//! cannot drift apart.

use crate::hash;
use crate::pkgname;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Pinned package set: canonical package name -> version specifier
pub type PackageSet = BTreeMap<String, String>;

/// Cached resolution result for one module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCacheEntry {
    /// SHA256 hex digest of the requirement text that produced `packages`
    pub hash: String,

    /// Pinned packages resolved from that text
    pub packages: PackageSet,

    /// When this entry was last written
    pub last_updated: DateTime<Utc>,
}

impl ModuleCacheEntry {
    /// Create an entry stamped with the current time
    pub fn new(hash: String, packages: PackageSet) -> Self {
        Self {
            hash,
            packages,
            last_updated: Utc::now(),
        }
    }
}

/// Root persisted cache document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyCache {
    /// Per-module resolution results, keyed by module name
    pub module_caches: BTreeMap<String, ModuleCacheEntry>,

    /// Digest over all module hashes, order-independent. Empty when
    /// there are no entries.
    pub combined_hash: String,

    /// Digest of the resolver environment fingerprint. Empty when the
    /// resolver does not report one.
    pub environment_hash: String,

    /// Last successfully merged package set
    pub resolved_packages: PackageSet,

    /// When the cache was last written
    pub last_updated: Option<DateTime<Utc>>,
}

impl DependencyCache {
    /// True if no module has ever been resolved
    pub fn is_empty(&self) -> bool {
        self.module_caches.is_empty()
    }

    /// Recompute `resolved_packages` and `combined_hash` from the
    /// current entries.
    ///
    /// Merge walks modules in sorted name order; when two modules pin
    /// the same package to different specifiers the later module wins
    /// and the conflict is logged as a warning. Returns the new
    /// combined hash.
    pub fn remerge(&mut self) -> String {
        let mut merged = PackageSet::new();

        for (module, entry) in &self.module_caches {
            for (name, spec) in &entry.packages {
                let canonical = pkgname::canonicalize(name);
                if let Some(existing) = merged.get(&canonical) {
                    if existing != spec {
                        warn!(
                            "Version conflict for '{}': '{}' replaced by '{}' from module '{}'",
                            canonical, existing, spec, module
                        );
                    }
                }
                merged.insert(canonical, spec.clone());
            }
        }

        self.resolved_packages = merged;
        self.combined_hash = hash::combine(
            self.module_caches
                .iter()
                .map(|(name, entry)| (name.as_str(), entry.hash.as_str())),
        );
        self.combined_hash.clone()
    }

    /// Drop all entries and derived state
    pub fn clear(&mut self) {
        self.module_caches.clear();
        self.combined_hash.clear();
        self.resolved_packages.clear();
        self.last_updated = None;
    }
}
