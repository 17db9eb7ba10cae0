//! Package version snapshots.
//!
//! A snapshot maps package names to the version strings recorded at the
//! last baseline (end of setup, or the last notification). Each write
//! fully replaces the previous snapshot; no history is kept.

pub mod store;

pub use store::{parse_snapshot, SnapshotStore};

use std::collections::BTreeMap;

/// Package name → version string, sorted by name.
pub type Snapshot = BTreeMap<String, String>;
