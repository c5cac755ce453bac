//! Persisted module-level dependency cache
//!
//! Keyed by the SHA256 hash of each module's requirement text. A
//! module whose hash matches its cache entry is never re-resolved;
//! the combined hash over all entries detects "nothing changed
//! anywhere" in one comparison.
//!
//! # Recovery model
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Missing cache file | start empty |
//! | Corrupt cache file | warn, start empty |
//! | Interrupted save | temp-and-rename, old file intact |
//! | Unusable cache directory | hard error |
//!
//! The cache file is not locked across processes; concurrent writers
//! are last-writer-wins.

pub mod admin;
pub mod model;
pub mod store;

pub use admin::{CacheAdmin, CacheInfo};
pub use model::{DependencyCache, ModuleCacheEntry, PackageSet};
pub use store::{CacheStore, CACHE_FILE};
