//! Configuration file loading and saving.
//!
//! The configuration is always read and written as a whole document.
//! Saving goes through a temporary file and a rename so a crash never
//! leaves a half-written config behind.

use crate::config::schema::MeerkatConfig;
use crate::error::{MeerkatError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/meerkat/meerkat.yml";

/// Reads and writes the configuration document at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for the given config file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the default config file.
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the config file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load and parse the config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the file doesn't exist.
    /// Returns `ConfigCorrupt` if the YAML is invalid.
    pub fn load(&self) -> Result<MeerkatConfig> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MeerkatError::ConfigMissing {
                    path: self.path.clone(),
                }
            } else {
                MeerkatError::Io(e)
            }
        })?;

        let config = parse_config(&content, &self.path)?;
        tracing::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    /// Serialize and write the whole config, creating the directory if needed.
    pub fn save(&self, config: &MeerkatConfig) -> Result<()> {
        let content =
            serde_yaml::to_string(config).map_err(|e| MeerkatError::ConfigValidation {
                message: format!("Failed to serialize config: {}", e),
            })?;

        write_atomic(&self.path, &content)?;
        tracing::info!("Saved config to {}", self.path.display());
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

/// Parse YAML content into MeerkatConfig.
///
/// An empty document yields the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<MeerkatConfig> {
    if content.trim().is_empty() {
        return Ok(MeerkatConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| MeerkatError::ConfigCorrupt {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a file via temp-file-then-rename, creating parent directories.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Channel;
    use tempfile::TempDir;

    fn sample_config() -> MeerkatConfig {
        let mut config = MeerkatConfig::default();
        config
            .general
            .selected_notifications
            .insert(Channel::DiscordWebhook);
        config.general.watched_packages.insert("nginx".to_string());
        config.general.watched_packages.insert("curl".to_string());
        config.general.watcher_file_path = PathBuf::from("/tmp/versions.yml");
        config.notifications.discord_webhook.url = "https://example.test/hook".to_string();
        config
    }

    #[test]
    fn load_missing_file_is_config_missing() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("meerkat.yml"));

        assert!(!store.exists());
        let result = store.load();
        assert!(matches!(result, Err(MeerkatError::ConfigMissing { .. })));
    }

    #[test]
    fn load_invalid_yaml_is_config_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("meerkat.yml");
        fs::write(&path, "general: [unclosed").unwrap();

        let result = ConfigStore::new(&path).load();
        assert!(matches!(result, Err(MeerkatError::ConfigCorrupt { .. })));
    }

    #[test]
    fn load_wrong_shape_is_config_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("meerkat.yml");
        fs::write(&path, "general:\n  watched_packages: 42\n").unwrap();

        let result = ConfigStore::new(&path).load();
        assert!(matches!(result, Err(MeerkatError::ConfigCorrupt { .. })));
    }

    #[test]
    fn save_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("etc").join("meerkat").join("meerkat.yml");
        let store = ConfigStore::new(&path);

        store.save(&sample_config()).unwrap();

        assert!(path.exists());
        assert!(!temp
            .path()
            .join("etc")
            .join("meerkat")
            .join("meerkat.yml.tmp")
            .exists());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("meerkat.yml"));
        let config = sample_config();

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn save_overwrites_whole_document() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("meerkat.yml"));
        store.save(&sample_config()).unwrap();

        let mut smaller = MeerkatConfig::default();
        smaller.general.watched_packages.insert("bash".to_string());
        store.save(&smaller).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, smaller);
        assert!(!loaded.general.watched_packages.contains("nginx"));
    }

    #[test]
    fn hand_written_document_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("meerkat.yml");
        fs::write(
            &path,
            "general:\n  selected_notifications:\n  - Discord Webhook\n  watched_packages:\n  - openssl\n  watcher_file_path: /var/lib/package_versions.yml\nnotifications:\n  discord_webhook:\n    url: ''\n",
        )
        .unwrap();

        let config = ConfigStore::new(&path).load().unwrap();
        assert!(config.is_enabled(Channel::DiscordWebhook));
        assert!(config.notifications.discord_webhook.url.is_empty());
    }

    #[test]
    fn empty_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("meerkat.yml");
        fs::write(&path, "").unwrap();

        let config = ConfigStore::new(&path).load().unwrap();
        assert_eq!(config, MeerkatConfig::default());
    }

    #[test]
    fn default_store_uses_etc_path() {
        let store = ConfigStore::default();
        assert_eq!(store.path(), Path::new("/etc/meerkat/meerkat.yml"));
    }
}
