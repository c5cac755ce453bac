//! Check command - verify cached packages against the environment

use crate::cache::CacheStore;
use crate::cli::args::CheckArgs;
use crate::cli::commands::make_resolver;
use crate::config::Config;
use crate::error::RepinResult;
use crate::pkgname;
use crate::resolver::Resolver;
use console::style;
use std::collections::HashSet;

/// Execute the check command
pub async fn execute(args: CheckArgs, config: &Config) -> RepinResult<()> {
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
    let installed = resolver.installed_packages().await?;

    println!(
        "Checking {} cached package(s) against {} installed package(s)...",
        cache.resolved_packages.len(),
        installed.len()
    );

    let missing: Vec<String> = cache
        .resolved_packages
        .iter()
        .filter(|(name, _)| !installed.contains(&pkgname::canonicalize(name)))
        .map(|(name, spec)| format!("{}{}", name, spec))
        .collect();

    if missing.is_empty() {
        println!(
            "{} All cached packages are installed",
            style("✓").green()
        );
    } else {
        println!(
            "{} {} cached package(s) are missing:",
            style("✗").red(),
            missing.len()
        );
        for package in &missing {
            println!("  {} {}", style("•").red(), package);
        }
    }

    if args.all {
        let cached: HashSet<String> = cache
            .resolved_packages
            .keys()
            .map(|name| pkgname::canonicalize(name))
            .collect();
        let mut extras: Vec<&String> = installed.iter().filter(|n| !cached.contains(*n)).collect();
        extras.sort();

        if !extras.is_empty() {
            println!(
                "{} {} package(s) installed but not in cache:",
                style("i").cyan(),
                extras.len()
            );
            for name in extras {
                println!("  {} {}", style("•").cyan(), name);
            }
        }
    }

    Ok(())
}
