//! Cache command - inspect and invalidate the dependency cache

use crate::cache::{CacheAdmin, CacheStore};
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::RepinResult;
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> RepinResult<()> {
    let store = CacheStore::open(config.cache.dir.clone()).await?;
    let admin = CacheAdmin::new(&store);

    match args.action {
        CacheAction::Info => show_info(&store, &admin).await,
        CacheAction::Clear { module } => clear(&admin, module).await,
    }
}

async fn show_info(store: &CacheStore, admin: &CacheAdmin<'_>) -> RepinResult<()> {
    let info = admin.info().await;

    println!("Cache directory:   {}", store.dir().display());
    println!("Module caches:     {}", info.module_count);
    println!("Resolved packages: {}", info.package_count);
    println!(
        "Combined hash:     {}",
        if info.combined_hash.is_empty() {
            "(none)".to_string()
        } else {
            info.combined_hash
        }
    );
    println!(
        "Last updated:      {}",
        info.last_updated
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
    );
    Ok(())
}

async fn clear(admin: &CacheAdmin<'_>, module: Option<String>) -> RepinResult<()> {
    match module {
        Some(name) => {
            if admin.invalidate_module(&name).await? {
                println!("{} Cleared cache for module '{}'", style("✓").green(), name);
            } else {
                println!("Module '{}' was not cached; nothing to clear", name);
            }
        }
        None => {
            admin.invalidate_all().await?;
            println!("{} Cleared entire dependency cache", style("✓").green());
        }
    }
    Ok(())
}
