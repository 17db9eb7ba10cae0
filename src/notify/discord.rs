//! Discord webhook delivery.
//!
//! Posts `{"content": "**<title>\n**<changes>"}` as JSON to the configured
//! webhook URL. Any transport error or non-2xx status is a delivery failure.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;

use crate::config::Channel;
use crate::error::{MeerkatError, Result};

use super::channel::{Notification, NotificationChannel};

/// Request body understood by Discord webhooks.
#[derive(Debug, Serialize)]
pub struct DiscordPayload {
    pub content: String,
}

impl DiscordPayload {
    /// Bold title line followed by the change lines.
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            content: format!("**{}\n**{}", notification.title, notification.body()),
        }
    }
}

/// Delivers notifications to a Discord webhook.
pub struct DiscordChannel {
    client: Client,
    url: String,
    timeout: Duration,
}

impl DiscordChannel {
    /// Create a channel with the default 30-second timeout.
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    /// Create a channel with a custom timeout.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("meerkat/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| MeerkatError::Other(e.into()))?;

        Ok(Self {
            client,
            url: url.trim().to_string(),
            timeout,
        })
    }

    /// Get the webhook URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn failure(&self, message: String) -> MeerkatError {
        MeerkatError::DeliveryFailed {
            channel: self.channel().to_string(),
            message,
        }
    }
}

impl NotificationChannel for DiscordChannel {
    fn channel(&self) -> Channel {
        Channel::DiscordWebhook
    }

    fn send(&self, notification: &Notification) -> Result<()> {
        let payload = DiscordPayload::from_notification(notification);
        tracing::debug!("Posting {} changes to Discord webhook", notification.changes.len());

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .map_err(|e| self.failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.failure(format!("HTTP {}", status)));
        }

        tracing::info!("Discord webhook accepted notification ({})", status);
        Ok(())
    }
}
