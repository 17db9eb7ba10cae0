//! Configuration schema definitions for Meerkat.
//!
//! This module contains the struct definitions that map to
//! the YAML configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Default location of the version snapshot file.
pub const DEFAULT_WATCHER_FILE_PATH: &str = "/var/lib/package_versions.yml";

/// Root configuration structure for meerkat.yml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeerkatConfig {
    /// General settings
    pub general: GeneralSettings,

    /// Per-channel notification settings
    pub notifications: NotificationSettings,
}

/// Settings that control what is watched and where state lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enabled notification channels
    pub selected_notifications: BTreeSet<Channel>,

    /// Package names to monitor
    pub watched_packages: BTreeSet<String>,

    /// Where the version snapshot is stored
    pub watcher_file_path: PathBuf,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            selected_notifications: BTreeSet::new(),
            watched_packages: BTreeSet::new(),
            watcher_file_path: PathBuf::from(DEFAULT_WATCHER_FILE_PATH),
        }
    }
}

/// Notification channel settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Discord webhook target
    pub discord_webhook: DiscordWebhookSettings,
}

/// Discord webhook target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordWebhookSettings {
    /// Webhook URL, empty until configured
    pub url: String,
}

/// A notification channel that can be enabled in `selected_notifications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Discord-style webhook (JSON `content` payload)
    #[serde(rename = "Discord Webhook")]
    DiscordWebhook,
}

impl Channel {
    /// All channels, in the order they are offered during setup.
    pub const ALL: &'static [Channel] = &[Channel::DiscordWebhook];

    /// Human-readable channel name, identical to its serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Channel::DiscordWebhook => "Discord Webhook",
        }
    }

    /// Parse a channel from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl MeerkatConfig {
    /// Check whether a channel is enabled.
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.general.selected_notifications.contains(&channel)
    }
}
