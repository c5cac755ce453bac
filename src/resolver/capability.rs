//! Resolver capability abstraction
//!
//! The constraint solver, installer, and installed-set query are
//! external collaborators behind one trait, so the caching engine
//! can be driven by pip-tools in production and a mock in tests.

use crate::cache::PackageSet;
use crate::error::RepinResult;
use async_trait::async_trait;
use std::collections::HashSet;

/// An installed package with a newer version available
#[derive(Debug, Clone)]
pub struct OutdatedPackage {
    /// Package name as reported by the installer
    pub name: String,
    /// Currently installed version
    pub current: String,
    /// Latest available version
    pub latest: String,
}

/// External resolver/installer capability
///
/// Implementations are stateless from the cache's perspective: text
/// in, pinned mapping out. They never hold a reference into the cache.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve a requirement text into pinned package versions
    async fn resolve(&self, requirement_text: &str) -> RepinResult<PackageSet>;

    /// Install the given pinned packages
    async fn install(&self, packages: &PackageSet) -> RepinResult<()>;

    /// Query canonical names of packages currently installed
    async fn installed_packages(&self) -> RepinResult<HashSet<String>>;

    /// Query installed packages that have newer versions available.
    /// The default reports none, for resolvers that cannot check.
    async fn outdated_packages(&self) -> RepinResult<Vec<OutdatedPackage>> {
        Ok(Vec::new())
    }

    /// Fingerprint of the resolution environment (interpreter version,
    /// platform). A changed fingerprint invalidates every module. The
    /// default disables environment tracking.
    async fn environment(&self) -> RepinResult<String> {
        Ok(String::new())
    }
}
