//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// repin - Incremental Dependency Resolution Cache
///
/// Hashes per-module requirement texts, re-resolves only what changed,
/// and merges the results into one pinned package set.
#[derive(Parser, Debug)]
#[command(name = "repin")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REPIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache directory (overrides config)
    #[arg(long, global = true, env = "REPIN_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve dependencies without installing
    Resolve(ResolveArgs),

    /// Resolve and install packages
    Install(InstallArgs),

    /// Force re-resolution and install the result
    Upgrade(InstallArgs),

    /// Verify cached packages against the environment
    Check(CheckArgs),

    /// Report cached packages with newer versions available
    Outdated,

    /// Manage the dependency cache
    Cache(CacheArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Requirements file to resolve (discovered if omitted)
    #[arg(short, long)]
    pub requirements: Option<PathBuf>,

    /// File name pattern for discovery
    #[arg(short, long, default_value = "requirements.txt")]
    pub pattern: String,

    /// Directories to search for requirements files
    #[arg(long = "search-dir")]
    pub search_dirs: Vec<PathBuf>,
}

/// Arguments for the install and upgrade commands
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Packages to install (e.g. "requests>=2.25")
    pub packages: Vec<String>,

    /// Requirements file to install from
    #[arg(short, long)]
    pub requirements: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Also show installed packages not present in the cache
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache information
    Info,

    /// Clear the cache
    Clear {
        /// Clear only this module's entry
        #[arg(long)]
        module: Option<String>,
    },
}
