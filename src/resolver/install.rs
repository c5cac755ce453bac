//! Installation reconciliation
//!
//! Compares the merged package set against what is already installed
//! and installs only the missing packages. An install-hook override,
//! when configured, replaces the default behavior entirely and its
//! boolean result is authoritative.

use crate::cache::PackageSet;
use crate::pkgname;
use crate::resolver::capability::Resolver;
use crate::resolver::hooks::InstallHook;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Reconciles resolved packages against the installed set
pub struct InstallationAdapter {
    resolver: Arc<dyn Resolver>,
    override_hook: Option<InstallHook>,
}

impl InstallationAdapter {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            override_hook: None,
        }
    }

    /// Replace the default install step with a hook
    pub fn with_override(mut self, hook: InstallHook) -> Self {
        self.override_hook = Some(hook);
        self
    }

    /// Install whatever is in `resolved` but not in `installed`.
    ///
    /// Returns false on any install error; already-installed packages
    /// are not rolled back. A hook error also counts as failure.
    pub async fn reconcile(&self, resolved: &PackageSet, installed: &HashSet<String>) -> bool {
        if let Some(hook) = &self.override_hook {
            return match hook(resolved, installed) {
                Ok(success) => success,
                Err(e) => {
                    error!("Install hook failed: {}", e);
                    false
                }
            };
        }

        let missing: PackageSet = resolved
            .iter()
            .filter(|(name, _)| !installed.contains(&pkgname::canonicalize(name)))
            .map(|(name, spec)| (name.clone(), spec.clone()))
            .collect();

        if missing.is_empty() {
            debug!("All {} resolved packages already installed", resolved.len());
            return true;
        }

        info!("Installing {} missing package(s)", missing.len());
        match self.resolver.install(&missing).await {
            Ok(()) => true,
            Err(e) => {
                error!("Installation failed: {}", e);
                false
            }
        }
    }
}
