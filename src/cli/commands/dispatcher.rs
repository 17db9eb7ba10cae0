//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for the startup sequence and flag routing

use std::path::{Path, PathBuf};

use crate::cli::args::{help_text, Action, Cli};
use crate::config::{ConfigStore, MeerkatConfig};
use crate::error::Result;
use crate::inventory::{detect_backend, PackageBackend};
use crate::notify::Notifier;
use crate::schedule::{detect_scheduler, scheduled_command, Scheduler};
use crate::snapshot::SnapshotStore;
use crate::ui::UserInterface;

use super::notify::NotifyCommand;
use super::setup::SetupCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success and exit code.
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Runs the startup sequence and routes the selected action.
///
/// The package backend and scheduler are probed from the host unless
/// supplied up front.
pub struct CommandDispatcher {
    store: ConfigStore,
    backend: Option<Box<dyn PackageBackend>>,
    scheduler: Option<Box<dyn Scheduler>>,
    hostname: Option<String>,
}

impl CommandDispatcher {
    /// Create a dispatcher for the given configuration file.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            store: ConfigStore::new(config_path),
            backend: None,
            scheduler: None,
            hostname: None,
        }
    }

    /// Use this package backend instead of probing `PATH`.
    pub fn with_backend(mut self, backend: Box<dyn PackageBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Use this scheduler instead of probing for crontab.
    pub fn with_scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Report changes under this host name instead of the FQDN.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Path {
        self.store.path()
    }

    /// Dispatch and execute the action selected by `cli`.
    ///
    /// Steps run in this order:
    ///
    /// 1. A missing configuration starts the setup wizard, whatever flag was
    ///    given, and the wizard ends the invocation.
    /// 2. The configuration is loaded; a corrupt file is fatal.
    /// 3. `--config` runs the wizard on the loaded configuration. It does not
    ///    read the version file, since the wizard is how a missing one gets
    ///    created.
    /// 4. Every other action loads the version file, queries the live
    ///    inventory once, and then runs notify, dry-run, or help.
    pub fn dispatch(&mut self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let action = cli.action();
        tracing::debug!("Dispatching {:?} with config {}", action, self.store.path().display());

        if !self.store.exists() {
            ui.message(&format!(
                "No configuration found at {}. Starting setup.",
                self.store.path().display()
            ));
            return self.setup(ui, MeerkatConfig::default());
        }

        let config = self.store.load()?;

        match action {
            Action::Setup => self.setup(ui, config),
            Action::Help => {
                self.prepare_notifier(config)?;
                ui.message(help_text().trim_end());
                Ok(CommandResult::success())
            }
            Action::Notify => NotifyCommand::new(self.prepare_notifier(config)?, false).execute(ui),
            Action::DryRun => NotifyCommand::new(self.prepare_notifier(config)?, true).execute(ui),
        }
    }

    fn setup(
        &mut self,
        ui: &mut dyn UserInterface,
        current: MeerkatConfig,
    ) -> Result<CommandResult> {
        let backend = self.take_backend()?;
        let scheduler = self.scheduler.take().unwrap_or_else(detect_scheduler);
        let exe = std::env::current_exe()?;
        let command = scheduled_command(&exe, self.store.path());

        SetupCommand::new(self.store.clone(), current, backend, scheduler, command).execute(ui)
    }

    /// Load the version file, then query the live inventory once.
    fn prepare_notifier(&mut self, config: MeerkatConfig) -> Result<Notifier> {
        let snapshots = SnapshotStore::new(&config.general.watcher_file_path);
        let stored = snapshots.load()?;

        let backend = self.take_backend()?;
        let live = backend.list_installed(&config.general.watched_packages)?;
        tracing::debug!(
            "{} reported {} of {} watched packages",
            backend.name(),
            live.len(),
            config.general.watched_packages.len()
        );

        let notifier = Notifier::new(config, snapshots, stored, live);
        Ok(match &self.hostname {
            Some(hostname) => notifier.with_hostname(hostname.clone()),
            None => notifier,
        })
    }

    fn take_backend(&mut self) -> Result<Box<dyn PackageBackend>> {
        match self.backend.take() {
            Some(backend) => Ok(backend),
            None => detect_backend(),
        }
    }
}
