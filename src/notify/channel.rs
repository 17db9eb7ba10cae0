//! Notification channels and messages.

use crate::config::{validate_channel_targets, Channel, MeerkatConfig};
use crate::diff::ChangeRecord;
use crate::error::Result;

use super::discord::DiscordChannel;

/// A drift report ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title line, e.g. `Changes on web01.example.org host: `.
    pub title: String,
    /// One entry per changed package.
    pub changes: Vec<ChangeRecord>,
}

impl Notification {
    /// Build a notification for the given host.
    pub fn new(hostname: &str, changes: Vec<ChangeRecord>) -> Self {
        Self {
            title: title_for(hostname),
            changes,
        }
    }

    /// Change lines joined with newlines.
    pub fn body(&self) -> String {
        self.changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plain text rendering: the title, then one change per line.
    pub fn plain_text(&self) -> String {
        format!("{}\n{}", self.title, self.body())
    }
}

/// The notification title for a host.
pub fn title_for(hostname: &str) -> String {
    format!("Changes on {} host: ", hostname)
}

/// Trait for notification delivery targets.
pub trait NotificationChannel {
    /// Which configured channel this is.
    fn channel(&self) -> Channel;

    /// Deliver the notification.
    fn send(&self, notification: &Notification) -> Result<()>;
}

/// Build delivery targets for every selected channel.
///
/// # Errors
///
/// Returns `WebhookMissing` if a selected channel has no target, before
/// anything is sent.
pub fn build_channels(config: &MeerkatConfig) -> Result<Vec<Box<dyn NotificationChannel>>> {
    validate_channel_targets(config)?;

    let mut channels: Vec<Box<dyn NotificationChannel>> = Vec::new();
    for channel in &config.general.selected_notifications {
        match channel {
            Channel::DiscordWebhook => {
                let url = &config.notifications.discord_webhook.url;
                channels.push(Box::new(DiscordChannel::new(url)?));
            }
        }
    }

    Ok(channels)
}
