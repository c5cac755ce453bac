//! Install command - resolve and install packages

use crate::cli::args::InstallArgs;
use crate::cli::commands::resolve::report_failures;
use crate::cli::commands::{gather_install_requirements, make_coordinator, make_resolver};
use crate::config::Config;
use crate::error::{RepinError, RepinResult};
use crate::resolver::{InstallationAdapter, Resolver};
use console::style;
use tracing::debug;

/// Execute the install command
pub async fn execute(args: InstallArgs, config: &Config) -> RepinResult<()> {
    let modules = gather_install_requirements(&args)?;

    let resolver = make_resolver(config);
    resolver.check_available().await?;

    let coordinator = make_coordinator(config).await?;
    let resolution = coordinator.resolve(&modules).await?;
    report_failures(&resolution.failed_modules);

    if resolution.cache_hit {
        debug!("Full cache hit, verifying installed set only");
    }

    let installed = resolver.installed_packages().await?;
    let adapter = InstallationAdapter::new(resolver);

    if adapter.reconcile(&resolution.packages, &installed).await {
        println!(
            "{} {} package(s) installed and pinned",
            style("✓").green(),
            resolution.packages.len()
        );
        Ok(())
    } else {
        Err(RepinError::Install(
            "one or more packages failed to install; resolution results remain cached"
                .to_string(),
        ))
    }
}
