//! Version drift detection.
//!
//! Compares the stored [`Snapshot`] against the live [`Inventory`]. Only
//! packages already present in the snapshot are compared; newly watched
//! packages become part of the baseline on the next snapshot write.

use std::fmt;

use crate::error::{MeerkatError, Result};
use crate::inventory::Inventory;
use crate::snapshot::Snapshot;

/// One package whose installed version differs from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub name: String,
    pub old: String,
    pub new: String,
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.old, self.new)
    }
}

/// Compute change records, ordered by package name.
///
/// # Errors
///
/// Returns `PackageVanished` when a package in the snapshot is missing
/// from the live inventory.
pub fn compute_changes(snapshot: &Snapshot, live: &Inventory) -> Result<Vec<ChangeRecord>> {
    let mut changes = Vec::new();

    for (name, old) in snapshot {
        let new = live
            .get(name)
            .ok_or_else(|| MeerkatError::PackageVanished { name: name.clone() })?;

        if old != new {
            changes.push(ChangeRecord {
                name: name.clone(),
                old: old.clone(),
                new: new.clone(),
            });
        }
    }

    tracing::debug!(
        "{} of {} stored packages changed",
        changes.len(),
        snapshot.len()
    );
    Ok(changes)
}
