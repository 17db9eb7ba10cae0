//! Error types for Meerkat operations.
//!
//! This module defines [`MeerkatError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every error is terminal for the current invocation; nothing is retried
//! - A missing configuration starts setup instead of surfacing `ConfigMissing`
//! - Use `anyhow::Error` (via `MeerkatError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Meerkat operations.
#[derive(Debug, Error)]
pub enum MeerkatError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigMissing { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigCorrupt { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// Snapshot file does not exist yet.
    #[error("No version file found at {path}! Please run `meerkat --config` first.")]
    NoSnapshotFile { path: PathBuf },

    /// Failed to parse the snapshot file.
    #[error("Failed to parse version file at {path}: {message}")]
    SnapshotCorrupt { path: PathBuf, message: String },

    /// Neither a Debian-family nor an RPM-family package manager is available.
    #[error("No supported package manager found (need dpkg-query or rpm)")]
    NoPackageBackend,

    /// The package manager query could not be run or failed.
    #[error("{backend} query failed: {message}")]
    InventoryQueryFailed { backend: String, message: String },

    /// A package recorded in the snapshot is no longer reported as installed.
    #[error("Watched package '{name}' is no longer installed")]
    PackageVanished { name: String },

    /// A selected notification channel has no target configured.
    #[error("Notification channel '{channel}' is selected but has no URL configured")]
    WebhookMissing { channel: String },

    /// Delivering a notification failed.
    #[error("Failed to deliver notification via {channel}: {message}")]
    DeliveryFailed { channel: String, message: String },

    /// Reading or writing scheduled jobs failed.
    #[error("Scheduler error: {message}")]
    Scheduler { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Meerkat operations.
pub type Result<T> = std::result::Result<T, MeerkatError>;
