//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - At least one package must be watched
//! - The snapshot path must not be empty
//! - Every selected channel must have its target configured

use crate::config::schema::{Channel, MeerkatConfig};
use crate::error::{MeerkatError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Channel if the error is channel-specific
    pub channel: Option<Channel>,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &MeerkatConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.general.watched_packages.is_empty() {
        errors.push(ValidationError {
            rule: "no-watched-packages".to_string(),
            message: "At least one package must be watched".to_string(),
            channel: None,
        });
    }

    if config.general.watcher_file_path.as_os_str().is_empty() {
        errors.push(ValidationError {
            rule: "empty-watcher-path".to_string(),
            message: "watcher_file_path cannot be empty".to_string(),
            channel: None,
        });
    }

    errors.extend(validate_channels(config));
    errors
}

/// Validate that every selected channel has a delivery target.
fn validate_channels(config: &MeerkatConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for channel in &config.general.selected_notifications {
        match channel {
            Channel::DiscordWebhook => {
                if config.notifications.discord_webhook.url.trim().is_empty() {
                    errors.push(ValidationError {
                        rule: "missing-webhook-url".to_string(),
                        message: format!("'{}' is selected but has no URL", channel),
                        channel: Some(*channel),
                    });
                }
            }
        }
    }

    errors
}

/// Ensure every selected channel can be delivered to.
///
/// # Errors
///
/// Returns `WebhookMissing` for the first selected channel without a target.
pub fn validate_channel_targets(config: &MeerkatConfig) -> Result<()> {
    match validate_channels(config).into_iter().next() {
        Some(ValidationError {
            channel: Some(channel),
            ..
        }) => Err(MeerkatError::WebhookMissing {
            channel: channel.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validate and return a single error summarizing all problems.
pub fn validate(config: &MeerkatConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(MeerkatError::ConfigValidation { message })
}
