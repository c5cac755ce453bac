//! CLI command implementations

pub mod cache;
pub mod check;
pub mod install;
pub mod outdated;
pub mod resolve;
pub mod upgrade;

pub use cache::execute as cache;
pub use check::execute as check;
pub use install::execute as install;
pub use outdated::execute as outdated;
pub use resolve::execute as resolve;
pub use upgrade::execute as upgrade;

use crate::cli::args::InstallArgs;
use crate::config::Config;
use crate::discovery;
use crate::error::{RepinError, RepinResult};
use crate::resolver::{PipResolver, ResolutionCoordinator};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Build the pip-backed resolver from config
pub(crate) fn make_resolver(config: &Config) -> Arc<PipResolver> {
    Arc::new(PipResolver::new(config.resolver.python.clone()))
}

/// Build a coordinator wired to the configured store and resolver
pub(crate) async fn make_coordinator(config: &Config) -> RepinResult<ResolutionCoordinator> {
    let store = crate::cache::CacheStore::open(config.cache.dir.clone()).await?;
    let mut coordinator = ResolutionCoordinator::new(store, make_resolver(config))
        .with_jobs(config.resolver.jobs);
    if config.resolver.timeout_secs > 0 {
        coordinator =
            coordinator.with_module_timeout(Duration::from_secs(config.resolver.timeout_secs));
    }
    Ok(coordinator)
}

/// Gather module requirements from a file, ad-hoc package specs, or
/// discovery, in that order of precedence.
pub(crate) fn gather_requirements(
    requirements: Option<&PathBuf>,
    packages: &[String],
    pattern: &str,
    search_dirs: &[PathBuf],
) -> RepinResult<BTreeMap<String, String>> {
    if let Some(path) = requirements {
        let content = std::fs::read_to_string(path)
            .map_err(|_| RepinError::RequirementsNotFound(path.clone()))?;
        let module = path.to_string_lossy().into_owned();
        return Ok([(module, content)].into());
    }

    if !packages.is_empty() {
        // Ad-hoc packages form a single synthetic module
        return Ok([("cli".to_string(), packages.join("\n"))].into());
    }

    let dirs: Vec<PathBuf> = if search_dirs.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        search_dirs.to_vec()
    };

    let modules = discovery::discover_requirements(&dirs, pattern)?;
    if modules.is_empty() {
        return Err(RepinError::NoRequirementsFound {
            pattern: pattern.to_string(),
            dirs,
        });
    }
    Ok(modules)
}

/// Requirements for install/upgrade: explicit file, packages, or
/// default-pattern discovery in the working directory.
pub(crate) fn gather_install_requirements(
    args: &InstallArgs,
) -> RepinResult<BTreeMap<String, String>> {
    gather_requirements(
        args.requirements.as_ref(),
        &args.packages,
        discovery::DEFAULT_PATTERN,
        &[],
    )
}
