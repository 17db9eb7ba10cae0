//! Persistent version snapshot storage.

use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::loader::write_atomic;
use crate::error::{MeerkatError, Result};

use super::Snapshot;

/// Reads and writes the package version snapshot at a configurable path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store for the given snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a snapshot has been written yet.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns `NoSnapshotFile` if the file doesn't exist.
    /// Returns `SnapshotCorrupt` if the content is not a name → version mapping.
    pub fn load(&self) -> Result<Snapshot> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MeerkatError::NoSnapshotFile {
                    path: self.path.clone(),
                }
            } else {
                MeerkatError::Io(e)
            }
        })?;

        let snapshot = parse_snapshot(&content, &self.path)?;
        tracing::debug!(
            "Loaded {} stored versions from {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    /// Replace the stored snapshot.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content =
            serde_yaml::to_string(snapshot).map_err(|e| MeerkatError::SnapshotCorrupt {
                path: self.path.clone(),
                message: format!("Failed to serialize snapshot: {}", e),
            })?;

        write_atomic(&self.path, &content)?;
        tracing::info!(
            "Stored {} package versions in {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Parse snapshot YAML.
///
/// Every version must be a YAML string. An unquoted `foo: 1.10` reads as
/// the number 1.1, which would no longer match the installed `1.10`, so
/// numbers and booleans are rejected with a hint to quote them.
pub fn parse_snapshot(content: &str, source_path: &Path) -> Result<Snapshot> {
    let corrupt = |message: String| MeerkatError::SnapshotCorrupt {
        path: source_path.to_path_buf(),
        message,
    };

    if content.trim().is_empty() {
        return Ok(Snapshot::new());
    }

    let raw: Option<BTreeMap<String, Value>> =
        serde_yaml::from_str(content).map_err(|e| corrupt(e.to_string()))?;

    let mut snapshot = Snapshot::new();
    for (name, value) in raw.unwrap_or_default() {
        let version = match value {
            Value::String(s) => s,
            Value::Number(_) | Value::Bool(_) => {
                return Err(corrupt(format!(
                    "version of '{}' must be quoted, e.g. {}: '<version>'",
                    name, name
                )))
            }
            other => {
                return Err(corrupt(format!(
                    "version of '{}' is not a string: {:?}",
                    name, other
                )))
            }
        };
        snapshot.insert(name, version);
    }

    Ok(snapshot)
}
