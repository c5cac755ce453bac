//! Upgrade command - force re-resolution and install the result
//!
//! Invalidates the cache entries for the requested modules so the
//! resolver runs fresh and picks up newer versions allowed by the
//! requirement specifiers, then installs the merged set.

use crate::cache::{CacheAdmin, CacheStore};
use crate::cli::args::InstallArgs;
use crate::cli::commands::{gather_install_requirements, install};
use crate::config::Config;
use crate::error::RepinResult;
use tracing::info;

/// Execute the upgrade command
pub async fn execute(args: InstallArgs, config: &Config) -> RepinResult<()> {
    let modules = gather_install_requirements(&args)?;

    let store = CacheStore::open(config.cache.dir.clone()).await?;
    let admin = CacheAdmin::new(&store);
    for name in modules.keys() {
        if admin.invalidate_module(name).await? {
            info!("Invalidated cached resolution for '{}'", name);
        }
    }

    install::execute(args, config).await
}
