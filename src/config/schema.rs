//! Configuration schema for repin
//!
//! Configuration is stored at `~/.config/repin/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Cache settings
    pub cache: CacheConfig,

    /// Resolver settings
    pub resolver: ResolverConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Dependency cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory. Defaults to `.dependency-cache` in the
    /// working directory so the cache travels with the project.
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".dependency-cache"),
        }
    }
}

/// External resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Python interpreter used for pip-compile and pip
    pub python: String,

    /// Maximum concurrent per-module resolver calls
    pub jobs: usize,

    /// Per-module resolver timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            jobs: crate::resolver::DEFAULT_JOBS,
            timeout_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.resolver.python, "python3");
        assert_eq!(config.resolver.jobs, 4);
        assert_eq!(config.cache.dir, PathBuf::from(".dependency-cache"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[resolver]\njobs = 8\n").unwrap();
        assert_eq!(config.resolver.jobs, 8);
        assert_eq!(config.resolver.python, "python3");
        assert_eq!(config.general.log_format, "text");
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = Config::default();
        config.resolver.python = "/usr/bin/python3.12".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.resolver.python, "/usr/bin/python3.12");
    }
}
