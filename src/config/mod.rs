//! Configuration loading, saving, and validation for Meerkat.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - Whole-document loading and atomic saving in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use meerkat::config::{Channel, ConfigStore, MeerkatConfig};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let store = ConfigStore::new(temp.path().join("meerkat.yml"));
//!
//! let mut config = MeerkatConfig::default();
//! config.general.watched_packages.insert("openssl".to_string());
//! config.general.selected_notifications.insert(Channel::DiscordWebhook);
//! config.notifications.discord_webhook.url = "https://example.test/hook".to_string();
//!
//! store.save(&config).unwrap();
//! assert_eq!(store.load().unwrap(), config);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{parse_config, ConfigStore, DEFAULT_CONFIG_PATH};
pub use schema::{
    Channel, DiscordWebhookSettings, GeneralSettings, MeerkatConfig, NotificationSettings,
    DEFAULT_WATCHER_FILE_PATH,
};
pub use validator::{validate, validate_channel_targets, validate_config, ValidationError};
