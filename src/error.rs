//! Error types for repin
//!
//! All modules use `RepinResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repin operations
pub type RepinResult<T> = Result<T, RepinError>;

/// All errors that can occur in repin
#[derive(Error, Debug)]
pub enum RepinError {
    // Cache errors
    #[error("Cache directory unusable: {path}: {source}")]
    CacheDirUnusable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to persist dependency cache to {path}: {reason}")]
    CachePersist { path: PathBuf, reason: String },

    // Resolver errors
    #[error("Resolver failed for module '{module}': {reason}")]
    ModuleResolve { module: String, reason: String },

    #[error("Resolver timed out for module '{module}' after {seconds}s")]
    ModuleTimeout { module: String, seconds: u64 },

    #[error("Resolver command failed: {command}: {stderr}")]
    ResolverCommand { command: String, stderr: String },

    #[error("Python interpreter not found: {0}. Install Python or set [resolver].python in the config.")]
    PythonNotFound(String),

    #[error("pip-tools not available. Run: pip install pip-tools")]
    PipToolsNotFound,

    // Installation errors
    #[error("Installation failed: {0}")]
    Install(String),

    // Discovery errors
    #[error("No requirements files matching '{pattern}' found under {dirs:?}")]
    NoRequirementsFound { pattern: String, dirs: Vec<PathBuf> },

    #[error("Requirements file not found: {0}")]
    RequirementsNotFound(PathBuf),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl RepinError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a module resolution error
    pub fn module_resolve(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModuleResolve {
            module: module.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::PipToolsNotFound => Some("Run: pip install pip-tools"),
            Self::PythonNotFound(_) => Some("Install Python 3 or set [resolver].python"),
            Self::CacheDirUnusable { .. } => {
                Some("Check permissions on the cache directory or pass --cache-dir")
            }
            Self::NoRequirementsFound { .. } => {
                Some("Pass -r <file> or run from a directory containing requirements.txt")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RepinError::module_resolve("web", "exit code 2");
        assert!(err.to_string().contains("web"));
        assert!(err.to_string().contains("exit code 2"));
    }

    #[test]
    fn error_hint() {
        let err = RepinError::PipToolsNotFound;
        assert_eq!(err.hint(), Some("Run: pip install pip-tools"));
    }

    #[test]
    fn timeout_display() {
        let err = RepinError::ModuleTimeout {
            module: "db".to_string(),
            seconds: 30,
        };
        assert!(err.to_string().contains("30s"));
    }
}
