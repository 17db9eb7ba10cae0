//! Periodic invocation registration.
//!
//! Setup can register Meerkat to run at every boot. The scheduler is a port
//! so the wizard works the same whether crontab is installed, missing, or
//! replaced by [`MemoryScheduler`] in tests.

pub mod crontab;

pub use crontab::{job_command, CrontabScheduler};

use std::path::Path;

use crate::config::ConfigStore;
use crate::error::{MeerkatError, Result};
use crate::inventory::{parse_system_path, resolve_tool_path};

/// Trait for registering scheduled jobs.
pub trait Scheduler {
    /// Whether jobs can be registered on this host.
    fn is_available(&self) -> bool;

    /// Check whether a job already runs exactly this command.
    fn has_existing_entry(&self, command: &str) -> Result<bool>;

    /// Register the command to run at every boot.
    fn register_at_boot(&mut self, command: &str) -> Result<()>;
}

/// Scheduler used when no scheduling facility exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableScheduler;

impl Scheduler for UnavailableScheduler {
    fn is_available(&self) -> bool {
        false
    }

    fn has_existing_entry(&self, _command: &str) -> Result<bool> {
        Ok(false)
    }

    fn register_at_boot(&mut self, _command: &str) -> Result<()> {
        Err(MeerkatError::Scheduler {
            message: "no scheduler available on this host".to_string(),
        })
    }
}

/// In-memory scheduler that records registrations.
#[derive(Debug, Clone)]
pub struct MemoryScheduler {
    entries: Vec<String>,
}

impl MemoryScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a scheduler that already has these boot entries.
    pub fn with_entries(entries: &[&str]) -> Self {
        Self {
            entries: entries.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Registered commands, in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for MemoryScheduler {
    fn is_available(&self) -> bool {
        true
    }

    fn has_existing_entry(&self, command: &str) -> Result<bool> {
        Ok(self.entries.iter().any(|e| e == command))
    }

    fn register_at_boot(&mut self, command: &str) -> Result<()> {
        self.entries.push(command.to_string());
        Ok(())
    }
}

/// Pick crontab when installed, otherwise the unavailable scheduler.
pub fn detect_scheduler() -> Box<dyn Scheduler> {
    match resolve_tool_path(crontab::CRONTAB, &parse_system_path()) {
        Some(program) => {
            tracing::debug!("Using crontab at {}", program.display());
            Box::new(CrontabScheduler::with_program(program))
        }
        None => Box::new(UnavailableScheduler),
    }
}

/// The command a scheduled job runs to check for changes.
///
/// The config path is included only when it differs from the default.
pub fn scheduled_command(exe: &Path, config_path: &Path) -> String {
    let mut command = shell_quote(&exe.to_string_lossy());
    if config_path != ConfigStore::default_path() {
        command.push_str(" --config-file ");
        command.push_str(&shell_quote(&config_path.to_string_lossy()));
    }
    command.push_str(" --notify");
    command
}

fn shell_quote(value: &str) -> String {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "/._-+:@=".contains(c))
    {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn unavailable_scheduler_reports_unavailable() {
        let mut scheduler = UnavailableScheduler;
        assert!(!scheduler.is_available());
        assert!(!scheduler.has_existing_entry("meerkat --notify").unwrap());
        assert!(scheduler.register_at_boot("meerkat --notify").is_err());
    }

    #[test]
    fn memory_scheduler_records_entries() {
        let mut scheduler = MemoryScheduler::new();
        assert!(!scheduler.has_existing_entry("meerkat --notify").unwrap());

        scheduler.register_at_boot("meerkat --notify").unwrap();

        assert!(scheduler.has_existing_entry("meerkat --notify").unwrap());
        assert_eq!(scheduler.entries(), &["meerkat --notify".to_string()]);
    }

    #[test]
    fn scheduled_command_with_default_config() {
        let command = scheduled_command(
            Path::new("/usr/local/bin/meerkat"),
            &ConfigStore::default_path(),
        );
        assert_eq!(command, "/usr/local/bin/meerkat --notify");
    }

    #[test]
    fn scheduled_command_with_custom_config() {
        let command = scheduled_command(
            Path::new("/usr/local/bin/meerkat"),
            &PathBuf::from("/opt/meerkat/meerkat.yml"),
        );
        assert_eq!(
            command,
            "/usr/local/bin/meerkat --config-file /opt/meerkat/meerkat.yml --notify"
        );
    }

    #[test]
    fn paths_with_spaces_are_quoted() {
        let command = scheduled_command(
            Path::new("/opt/my tools/meerkat"),
            &ConfigStore::default_path(),
        );
        assert_eq!(command, "'/opt/my tools/meerkat' --notify");
    }
}
