//! RPM-family inventory via `rpm -qa`.

use std::path::PathBuf;

use crate::error::Result;

use super::{run_query, Inventory, PackageBackend};

/// Name of the rpm tool.
pub const RPM: &str = "rpm";

/// One row per package: name, epoch, version, release.
const QUERY_FORMAT: &str = "%{NAME}\t%{EPOCH}\t%{VERSION}\t%{RELEASE}\n";

/// Lists installed packages from the RPM database.
#[derive(Debug, Clone)]
pub struct RpmBackend {
    program: PathBuf,
}

impl RpmBackend {
    /// Use `rpm` from PATH.
    pub fn new() -> Self {
        Self::with_program(RPM)
    }

    /// Use a specific `rpm` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for RpmBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBackend for RpmBackend {
    fn name(&self) -> &str {
        "rpm"
    }

    fn list_all(&self) -> Result<Inventory> {
        tracing::debug!("Querying installed RPM packages");
        let stdout = run_query(
            self.name(),
            &self.program,
            &["-qa", "--queryformat", QUERY_FORMAT],
        )?;
        let packages = parse_rpm_output(&stdout);
        tracing::debug!("Found {} installed RPM packages", packages.len());
        Ok(packages)
    }
}

/// Format an RPM version as `epoch:version-release`.
///
/// The epoch is omitted when unset (`(none)`) or zero.
pub fn format_evr(epoch: &str, version: &str, release: &str) -> String {
    let mut evr = String::new();
    if let Ok(epoch) = epoch.trim().parse::<u64>() {
        if epoch > 0 {
            evr.push_str(&format!("{}:", epoch));
        }
    }
    evr.push_str(version);
    if !release.is_empty() {
        evr.push('-');
        evr.push_str(release);
    }
    evr
}

/// Parse `rpm -qa` rows into an inventory.
///
/// `gpg-pubkey` and other multi-instance packages keep the first row.
pub fn parse_rpm_output(output: &str) -> Inventory {
    let mut packages = Inventory::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let &[name, epoch, version, release] = fields.as_slice() else {
            continue;
        };
        if name.is_empty() || version.is_empty() {
            continue;
        }

        packages
            .entry(name.to_string())
            .or_insert_with(|| format_evr(epoch, version, release));
    }

    packages
}
