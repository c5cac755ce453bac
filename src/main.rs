//! repin - Incremental Dependency Resolution Cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use repin::cli::{Cli, Commands};
use repin::config::ConfigManager;
use repin::error::RepinResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RepinResult<()> {
    let cli = Cli::parse();

    // Load configuration, then apply CLI overrides
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let mut config = config_manager.load().await?;
    if let Some(dir) = cli.cache_dir {
        config.cache.dir = dir;
    }

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("repin=warn"),
        1 => EnvFilter::new("repin=info"),
        _ => EnvFilter::new("repin=debug"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();
    if config.general.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    // Dispatch to command
    match cli.command {
        Commands::Resolve(args) => repin::cli::commands::resolve(args, &config).await,
        Commands::Install(args) => repin::cli::commands::install(args, &config).await,
        Commands::Upgrade(args) => repin::cli::commands::upgrade(args, &config).await,
        Commands::Check(args) => repin::cli::commands::check(args, &config).await,
        Commands::Outdated => repin::cli::commands::outdated(&config).await,
        Commands::Cache(args) => repin::cli::commands::cache(args, &config).await,
    }
}
