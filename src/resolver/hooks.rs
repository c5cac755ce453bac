//! Resolution lifecycle hooks
//!
//! Pre- and post-resolve hooks are best-effort by contract: a failing
//! hook is logged and ignored, never allowed to abort a resolution
//! pass. The install override is different: its return value is
//! authoritative and an error from it counts as install failure.

use crate::cache::PackageSet;
use crate::error::RepinResult;
use std::collections::HashSet;
use tracing::warn;

/// Called for each changed module before its resolver call:
/// `(module_name, requirement_text)`
pub type PreResolveHook = Box<dyn Fn(&str, &str) -> RepinResult<()> + Send + Sync>;

/// Called after a module resolves successfully:
/// `(module_name, resolved_packages)`
pub type PostResolveHook = Box<dyn Fn(&str, &PackageSet) -> RepinResult<()> + Send + Sync>;

/// Replaces the default install step when set:
/// `(resolved_packages, installed_packages) -> success`
pub type InstallHook =
    Box<dyn Fn(&PackageSet, &HashSet<String>) -> RepinResult<bool> + Send + Sync>;

/// Optional hook set threaded through the coordinator and installer
#[derive(Default)]
pub struct ResolverHooks {
    pub pre_resolve: Option<PreResolveHook>,
    pub post_resolve: Option<PostResolveHook>,
    pub install: Option<InstallHook>,
}

impl ResolverHooks {
    /// Fire the pre-resolve hook, swallowing failures
    pub fn fire_pre_resolve(&self, module: &str, requirement_text: &str) {
        if let Some(hook) = &self.pre_resolve {
            if let Err(e) = hook(module, requirement_text) {
                warn!("Pre-resolve hook failed for module '{}': {}", module, e);
            }
        }
    }

    /// Fire the post-resolve hook, swallowing failures
    pub fn fire_post_resolve(&self, module: &str, packages: &PackageSet) {
        if let Some(hook) = &self.post_resolve {
            if let Err(e) = hook(module, packages) {
                warn!("Post-resolve hook failed for module '{}': {}", module, e);
            }
        }
    }
}

impl std::fmt::Debug for ResolverHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverHooks")
            .field("pre_resolve", &self.pre_resolve.is_some())
            .field("post_resolve", &self.post_resolve.is_some())
            .field("install", &self.install.is_some())
            .finish()
    }
}
