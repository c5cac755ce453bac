//! Resolve command - resolve dependencies without installing

use crate::cli::args::ResolveArgs;
use crate::cli::commands::{gather_requirements, make_coordinator};
use crate::config::Config;
use crate::error::RepinResult;
use console::style;
use tracing::debug;

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> RepinResult<()> {
    let modules = gather_requirements(
        args.requirements.as_ref(),
        &[],
        &args.pattern,
        &args.search_dirs,
    )?;
    debug!("Resolving {} module(s)", modules.len());

    let coordinator = make_coordinator(config).await?;
    let resolution = coordinator.resolve(&modules).await?;

    if resolution.cache_hit {
        println!(
            "{} Nothing changed, {} package(s) served from cache",
            style("✓").green(),
            resolution.packages.len()
        );
    } else {
        println!(
            "{} Resolved {} package(s) across {} module(s)",
            style("✓").green(),
            resolution.packages.len(),
            modules.len()
        );
    }

    for (name, spec) in &resolution.packages {
        println!("  {}{}", name, spec);
    }

    report_failures(&resolution.failed_modules);
    Ok(())
}

/// Print failed modules as a warning block
pub(crate) fn report_failures(failed: &[String]) {
    if failed.is_empty() {
        return;
    }
    eprintln!(
        "{} {} module(s) failed to resolve (last-good cache entries kept):",
        style("Warning:").yellow().bold(),
        failed.len()
    );
    for module in failed {
        eprintln!("  {} {}", style("•").yellow(), module);
    }
}
