//! Outdated command - report cached packages with newer versions

use crate::cache::CacheStore;
use crate::cli::commands::make_resolver;
use crate::config::Config;
use crate::error::RepinResult;
use crate::pkgname;
use crate::resolver::{OutdatedPackage, Resolver};
use console::style;
use std::collections::HashSet;

/// Execute the outdated command
pub async fn execute(config: &Config) -> RepinResult<()> {
    let store = CacheStore::open(config.cache.dir.clone()).await?;
    let cache = store.load().await;

    if cache.resolved_packages.is_empty() {
        println!(
            "{} No cached packages found. Run 'repin install' first.",
            style("✗").red()
        );
        return Ok(());
    }

    let resolver = make_resolver(config);
    let outdated = resolver.outdated_packages().await?;

    let cached: HashSet<String> = cache
        .resolved_packages
        .keys()
        .map(|name| pkgname::canonicalize(name))
        .collect();
    let stale = filter_cached(&outdated, &cached);

    if stale.is_empty() {
        println!(
            "{} All cached packages are up-to-date",
            style("✓").green()
        );
        return Ok(());
    }

    println!(
        "{} {} cached package(s) have newer versions:",
        style("i").cyan(),
        stale.len()
    );
    for package in stale {
        println!(
            "  {} {}: {} → {}",
            style("•").cyan(),
            package.name,
            package.current,
            package.latest
        );
    }
    Ok(())
}

/// Restrict the installer's outdated report to packages the cache pins
fn filter_cached<'a>(
    outdated: &'a [OutdatedPackage],
    cached: &HashSet<String>,
) -> Vec<&'a OutdatedPackage> {
    outdated
        .iter()
        .filter(|p| cached.contains(&pkgname::canonicalize(&p.name)))
        .collect()
}
