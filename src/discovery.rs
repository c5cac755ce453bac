//! Requirements file discovery
//!
//! Walks search directories for requirement files matching a pattern
//! (default `requirements.txt`) and keys each one by its path relative
//! to the search root, so every subsystem's requirements become an
//! independently cached module.

use crate::error::{RepinError, RepinResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Default file name pattern for discovery
pub const DEFAULT_PATTERN: &str = "requirements.txt";

/// Directory names that never contain project requirements
const SKIP_DIRS: &[&str] = &[
    ".git",
    ".venv",
    "venv",
    "node_modules",
    "__pycache__",
    ".tox",
];

/// Find requirement files under the given directories.
///
/// Returns module name -> file contents, where the module name is the
/// file path relative to its search root (with `/` separators). An
/// unreadable file is an error; finding nothing is not.
pub fn discover_requirements(
    search_dirs: &[PathBuf],
    pattern: &str,
) -> RepinResult<BTreeMap<String, String>> {
    let mut modules = BTreeMap::new();

    for root in search_dirs {
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if entry.file_name().to_string_lossy() != pattern {
                continue;
            }

            let path = entry.path();
            let content = std::fs::read_to_string(path)
                .map_err(|e| RepinError::io(format!("reading {}", path.display()), e))?;

            let module = module_name(root, path);
            debug!("Discovered requirements module '{}'", module);
            modules.insert(module, content);
        }
    }

    Ok(modules)
}

/// Module name for a requirements file: its path relative to the
/// search root, normalized to `/` separators.
fn module_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| SKIP_DIRS.contains(&name))
        .unwrap_or(false)
}
