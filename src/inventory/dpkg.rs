//! Debian-family inventory via `dpkg-query`.

use std::path::PathBuf;

use crate::error::Result;

use super::{run_query, Inventory, PackageBackend};

/// Name of the dpkg query tool.
pub const DPKG_QUERY: &str = "dpkg-query";

/// One row per package: name, version, and install state.
const QUERY_FORMAT: &str = "${Package}\t${Version}\t${db:Status-Status}\n";

/// Lists installed packages from the dpkg database.
#[derive(Debug, Clone)]
pub struct DpkgBackend {
    program: PathBuf,
}

impl DpkgBackend {
    /// Use `dpkg-query` from PATH.
    pub fn new() -> Self {
        Self::with_program(DPKG_QUERY)
    }

    /// Use a specific `dpkg-query` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DpkgBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBackend for DpkgBackend {
    fn name(&self) -> &str {
        "dpkg"
    }

    fn list_all(&self) -> Result<Inventory> {
        tracing::debug!("Querying installed dpkg packages");
        let stdout = run_query(self.name(), &self.program, &["-W", "-f", QUERY_FORMAT])?;
        let packages = parse_dpkg_output(&stdout);
        tracing::debug!("Found {} installed dpkg packages", packages.len());
        Ok(packages)
    }
}

/// Parse `dpkg-query` rows into an inventory.
///
/// Rows whose state is not `installed` (removed with config left behind,
/// half-configured, ...) are skipped. For multi-arch packages the first
/// installed row wins.
pub fn parse_dpkg_output(output: &str) -> Inventory {
    let mut packages = Inventory::new();

    for line in output.lines() {
        let mut fields = line.split('\t');
        let (Some(name), Some(version), Some(status)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };

        let name = name.trim();
        let version = version.trim();
        if name.is_empty() || version.is_empty() || status.trim() != "installed" {
            continue;
        }

        packages
            .entry(name.to_string())
            .or_insert_with(|| version.to_string());
    }

    packages
}
