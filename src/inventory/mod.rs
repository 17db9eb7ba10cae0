//! Installed package inventory.
//!
//! This module provides:
//! - [`PackageBackend`] trait over the host's package database
//! - [`DpkgBackend`] for Debian-family hosts
//! - [`RpmBackend`] for RPM-family hosts
//! - [`StaticBackend`] with a fixed package list, for tests and previews
//! - [`detect_backend`] which picks the one backend available on this host
//!
//! Version strings are opaque. Debian versions are reported as installed,
//! RPM versions as `epoch:version-release`; nothing here compares them
//! beyond byte equality.

pub mod dpkg;
pub mod rpm;

pub use dpkg::{parse_dpkg_output, DpkgBackend};
pub use rpm::{parse_rpm_output, RpmBackend};

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MeerkatError, Result};

/// Package name → installed version string.
pub type Inventory = BTreeMap<String, String>;

/// Trait for querying the host package database.
pub trait PackageBackend {
    /// Short backend name used in messages.
    fn name(&self) -> &str;

    /// Every installed package with its version.
    fn list_all(&self) -> Result<Inventory>;

    /// Installed packages restricted to the watch set.
    ///
    /// Watched packages that are not installed are simply absent.
    fn list_installed(&self, watch: &BTreeSet<String>) -> Result<Inventory> {
        let installed: Inventory = self
            .list_all()?
            .into_iter()
            .filter(|(name, _)| watch.contains(name))
            .collect();

        tracing::debug!(
            "{}: {} of {} watched packages installed",
            self.name(),
            installed.len(),
            watch.len()
        );
        Ok(installed)
    }
}

/// Backend with a fixed set of packages.
#[derive(Debug, Clone, Default)]
pub struct StaticBackend {
    packages: Inventory,
}

impl StaticBackend {
    /// Create a backend reporting exactly these packages.
    pub fn new(packages: Inventory) -> Self {
        Self { packages }
    }

    /// Build from `(name, version)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl PackageBackend for StaticBackend {
    fn name(&self) -> &str {
        "static"
    }

    fn list_all(&self) -> Result<Inventory> {
        Ok(self.packages.clone())
    }
}

/// Pick the package backend available on this host.
///
/// Probes `PATH` for `dpkg-query` first, then `rpm`.
///
/// # Errors
///
/// Returns `NoPackageBackend` when neither tool is installed.
pub fn detect_backend() -> Result<Box<dyn PackageBackend>> {
    detect_backend_in(&parse_system_path())
}

/// Pick a backend by searching the given directories.
pub fn detect_backend_in(path_entries: &[PathBuf]) -> Result<Box<dyn PackageBackend>> {
    if let Some(program) = resolve_tool_path(dpkg::DPKG_QUERY, path_entries) {
        tracing::debug!("Using dpkg backend at {}", program.display());
        return Ok(Box::new(DpkgBackend::with_program(program)));
    }

    if let Some(program) = resolve_tool_path(rpm::RPM, path_entries) {
        tracing::debug!("Using rpm backend at {}", program.display());
        return Ok(Box::new(RpmBackend::with_program(program)));
    }

    Err(MeerkatError::NoPackageBackend)
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    path_entries
        .iter()
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Run a query command and return its stdout.
fn run_query(backend: &str, program: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| MeerkatError::InventoryQueryFailed {
            backend: backend.to_string(),
            message: format!("failed to run {}: {}", program.display(), e),
        })?;

    if !output.status.success() {
        return Err(MeerkatError::InventoryQueryFailed {
            backend: backend.to_string(),
            message: format!(
                "{} exited with {}: {}",
                program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn make_executable(dir: &Path, name: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn static_backend_lists_all() {
        let backend = StaticBackend::from_pairs(&[("foo", "1.0"), ("bar", "2.0")]);
        let all = backend.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["foo"], "1.0");
    }

    #[test]
    fn list_installed_filters_to_watch_set() {
        let backend =
            StaticBackend::from_pairs(&[("foo", "1.0"), ("bar", "2.0"), ("baz", "3.0")]);
        let watch: BTreeSet<String> = ["foo", "baz", "not-installed"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let installed = backend.list_installed(&watch).unwrap();

        assert_eq!(installed.len(), 2);
        assert_eq!(installed["foo"], "1.0");
        assert_eq!(installed["baz"], "3.0");
        assert!(!installed.contains_key("bar"));
        assert!(!installed.contains_key("not-installed"));
    }

    #[test]
    fn no_tools_means_no_backend() {
        let temp = TempDir::new().unwrap();
        let result = detect_backend_in(&[temp.path().to_path_buf()]);
        assert!(matches!(result, Err(MeerkatError::NoPackageBackend)));
    }

    #[cfg(unix)]
    #[test]
    fn dpkg_query_is_preferred() {
        let temp = TempDir::new().unwrap();
        make_executable(temp.path(), "dpkg-query");
        make_executable(temp.path(), "rpm");

        let backend = detect_backend_in(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(backend.name(), "dpkg");
    }

    #[cfg(unix)]
    #[test]
    fn rpm_is_used_without_dpkg() {
        let temp = TempDir::new().unwrap();
        make_executable(temp.path(), "rpm");

        let backend = detect_backend_in(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(backend.name(), "rpm");
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("dpkg-query"), "").unwrap();

        assert!(resolve_tool_path("dpkg-query", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn missing_program_is_query_failure() {
        let result = run_query("dpkg", Path::new("/nonexistent/dpkg-query"), &["-W"]);
        assert!(matches!(
            result,
            Err(MeerkatError::InventoryQueryFailed { ref backend, .. }) if backend == "dpkg"
        ));
    }
}
