//! Drift reporting.
//!
//! The [`Notifier`] compares the stored snapshot against the live
//! inventory, then either previews the report, reports that nothing
//! changed, or delivers the report to every selected channel and rolls the
//! snapshot forward.

pub mod channel;
pub mod discord;

pub use channel::{build_channels, title_for, Notification, NotificationChannel};
pub use discord::{DiscordChannel, DiscordPayload};

use crate::config::MeerkatConfig;
use crate::diff::compute_changes;
use crate::error::Result;
use crate::host;
use crate::inventory::Inventory;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::ui::UserInterface;

/// Message printed when every watched package is unchanged.
pub const NO_CHANGES_MESSAGE: &str = "No changes in watched packages.";

/// What a notify run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Dry run; the report was printed with this many changes.
    Previewed(usize),
    /// Nothing changed; nothing was sent.
    NoChanges,
    /// This many changes were delivered and the snapshot was updated.
    Delivered(usize),
}

/// Compares a stored snapshot with the live inventory and reports drift.
pub struct Notifier {
    config: MeerkatConfig,
    snapshots: SnapshotStore,
    stored: Snapshot,
    live: Inventory,
    hostname: Option<String>,
}

impl Notifier {
    /// Create a notifier.
    ///
    /// `stored` is the snapshot previously loaded from `snapshots`, `live`
    /// the current versions of the watched packages.
    pub fn new(
        config: MeerkatConfig,
        snapshots: SnapshotStore,
        stored: Snapshot,
        live: Inventory,
    ) -> Self {
        Self {
            config,
            snapshots,
            stored,
            live,
            hostname: None,
        }
    }

    /// Use a fixed host name instead of resolving the FQDN.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    fn hostname(&self) -> String {
        self.hostname.clone().unwrap_or_else(host::fqdn)
    }

    /// Run the drift check.
    ///
    /// With `dry_run` the report is printed and nothing is sent or written.
    ///
    /// # Errors
    ///
    /// `PackageVanished` if a snapshot entry is no longer installed,
    /// `WebhookMissing` if a selected channel has no target, and
    /// `DeliveryFailed` if a channel rejects the report. The snapshot is
    /// only overwritten after every channel succeeded.
    pub fn notify(&self, ui: &mut dyn UserInterface, dry_run: bool) -> Result<NotifyOutcome> {
        let changes = compute_changes(&self.stored, &self.live)?;
        let count = changes.len();
        let notification = Notification::new(&self.hostname(), changes);

        if dry_run {
            ui.message(&notification.plain_text());
            return Ok(NotifyOutcome::Previewed(count));
        }

        if count == 0 {
            ui.message(NO_CHANGES_MESSAGE);
            return Ok(NotifyOutcome::NoChanges);
        }

        for target in build_channels(&self.config)? {
            target.send(&notification)?;
            tracing::info!("Delivered {} changes via {}", count, target.channel());
        }

        self.snapshots.save(&self.live)?;
        Ok(NotifyOutcome::Delivered(count))
    }
}
