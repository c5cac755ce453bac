//! pip-tools backed resolver
//!
//! Implements the `Resolver` trait by shelling out to the Python
//! toolchain: `pip-compile` (from pip-tools) for resolution, `pip`
//! for installation and the installed-set query.

use crate::cache::PackageSet;
use crate::error::{RepinError, RepinResult};
use crate::pkgname;
use crate::resolver::capability::{OutdatedPackage, Resolver};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Resolver backed by pip-compile and pip subprocesses
pub struct PipResolver {
    python: String,
}

#[derive(Deserialize)]
struct PipListEntry {
    name: String,
}

#[derive(Deserialize)]
struct PipOutdatedEntry {
    name: String,
    version: String,
    latest_version: String,
}

impl PipResolver {
    /// Create a resolver using the given Python interpreter
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Check that the interpreter and pip-tools are usable
    pub async fn check_available(&self) -> RepinResult<()> {
        let python_ok = Command::new(&self.python)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false);
        if !python_ok {
            return Err(RepinError::PythonNotFound(self.python.clone()));
        }

        let piptools_ok = Command::new(&self.python)
            .args(["-m", "piptools", "--help"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false);
        if !piptools_ok {
            return Err(RepinError::PipToolsNotFound);
        }

        Ok(())
    }

    /// Parse pip-compile output lines into a pinned package set
    fn parse_compiled(output: &str) -> PackageSet {
        let mut packages = PackageSet::new();
        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("--") {
                continue;
            }
            // Strip trailing hash/comment annotations
            let line = line.split(" #").next().unwrap_or(line).trim_end_matches('\\').trim();
            let (name, spec) = pkgname::split_requirement(line);
            if !name.is_empty() && !spec.is_empty() {
                packages.insert(pkgname::canonicalize(&name), spec);
            }
        }
        packages
    }

    /// Parse `pip list --outdated` JSON output
    fn parse_outdated(raw: &[u8]) -> RepinResult<Vec<OutdatedPackage>> {
        let entries: Vec<PipOutdatedEntry> = serde_json::from_slice(raw)?;
        Ok(entries
            .into_iter()
            .map(|e| OutdatedPackage {
                name: e.name,
                current: e.version,
                latest: e.latest_version,
            })
            .collect())
    }
}

#[async_trait]
impl Resolver for PipResolver {
    async fn resolve(&self, requirement_text: &str) -> RepinResult<PackageSet> {
        debug!("Running pip-compile on {} bytes of requirements", requirement_text.len());

        let mut child = Command::new(&self.python)
            .args([
                "-m",
                "piptools",
                "compile",
                "--quiet",
                "--no-header",
                "--no-annotate",
                "--output-file",
                "-",
                "-",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RepinError::io("spawning pip-compile", e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(requirement_text.as_bytes())
                .await
                .map_err(|e| RepinError::io("writing requirements to pip-compile", e))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| RepinError::io("waiting for pip-compile", e))?;

        if !output.status.success() {
            return Err(RepinError::ResolverCommand {
                command: "pip-compile".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(Self::parse_compiled(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn install(&self, packages: &PackageSet) -> RepinResult<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let specs: Vec<String> = packages
            .iter()
            .map(|(name, spec)| format!("{}{}", name, spec))
            .collect();
        debug!("Installing {} packages via pip", specs.len());

        let output = Command::new(&self.python)
            .args(["-m", "pip", "install", "--quiet"])
            .args(&specs)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RepinError::io("spawning pip install", e))?;

        if !output.status.success() {
            return Err(RepinError::Install(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }

    async fn installed_packages(&self) -> RepinResult<HashSet<String>> {
        let output = Command::new(&self.python)
            .args(["-m", "pip", "list", "--format", "json"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RepinError::io("spawning pip list", e))?;

        if !output.status.success() {
            return Err(RepinError::ResolverCommand {
                command: "pip list".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let entries: Vec<PipListEntry> = serde_json::from_slice(&output.stdout)?;
        Ok(entries
            .into_iter()
            .map(|e| pkgname::canonicalize(&e.name))
            .collect())
    }

    async fn outdated_packages(&self) -> RepinResult<Vec<OutdatedPackage>> {
        let output = Command::new(&self.python)
            .args(["-m", "pip", "list", "--outdated", "--format", "json"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RepinError::io("spawning pip list --outdated", e))?;

        if !output.status.success() {
            return Err(RepinError::ResolverCommand {
                command: "pip list --outdated".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Self::parse_outdated(&output.stdout)
    }

    async fn environment(&self) -> RepinResult<String> {
        let output = Command::new(&self.python)
            .args([
                "-c",
                "import platform,sys;print(sys.version.split()[0],platform.platform(),sys.prefix)",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| RepinError::io("querying python environment", e))?;

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
