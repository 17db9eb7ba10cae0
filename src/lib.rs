//! Meerkat - watch installed package versions and report changes.
//!
//! Meerkat records the versions of a chosen set of installed packages,
//! compares them with the live package database on every run, and posts
//! the differences to a Discord webhook.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, saving, and validation
//! - [`diff`] - Snapshot versus live inventory comparison
//! - [`error`] - Error types and result aliases
//! - [`host`] - Host name resolution for reports
//! - [`inventory`] - dpkg and rpm package queries
//! - [`notify`] - Drift reports and delivery channels
//! - [`schedule`] - Boot job registration
//! - [`setup`] - Interactive setup wizard
//! - [`snapshot`] - The persisted version file
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use meerkat::diff::compute_changes;
//! use meerkat::inventory::Inventory;
//! use meerkat::snapshot::Snapshot;
//!
//! let stored: Snapshot = [("curl".to_string(), "7.88.1".to_string())].into();
//! let live: Inventory = [("curl".to_string(), "7.88.2".to_string())].into();
//!
//! let changes = compute_changes(&stored, &live).unwrap();
//! assert_eq!(changes[0].to_string(), "curl: 7.88.1 -> 7.88.2");
//! ```

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod host;
pub mod inventory;
pub mod notify;
pub mod schedule;
pub mod setup;
pub mod snapshot;
pub mod ui;

pub use error::{MeerkatError, Result};
