//! Setup command implementation.
//!
//! `meerkat --config` runs the setup wizard. It also runs on its own when no
//! configuration exists yet.

use crate::config::{ConfigStore, MeerkatConfig};
use crate::error::Result;
use crate::inventory::PackageBackend;
use crate::schedule::Scheduler;
use crate::setup::{SetupWizard, WizardOutcome};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The setup command implementation.
pub struct SetupCommand {
    store: ConfigStore,
    current: MeerkatConfig,
    backend: Box<dyn PackageBackend>,
    scheduler: Box<dyn Scheduler>,
    scheduled_command: String,
}

impl SetupCommand {
    /// Create a new setup command pre-filled from `current`.
    pub fn new(
        store: ConfigStore,
        current: MeerkatConfig,
        backend: Box<dyn PackageBackend>,
        scheduler: Box<dyn Scheduler>,
        scheduled_command: String,
    ) -> Self {
        Self {
            store,
            current,
            backend,
            scheduler,
            scheduled_command,
        }
    }
}

impl Command for SetupCommand {
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut wizard = SetupWizard::new(
            self.store.clone(),
            self.backend.as_ref(),
            self.scheduler.as_mut(),
            self.scheduled_command.clone(),
        );

        match wizard.run(ui, self.current.clone())? {
            WizardOutcome::Committed(config) => {
                tracing::info!(
                    "Setup complete: {} watched packages",
                    config.general.watched_packages.len()
                );
            }
            WizardOutcome::Aborted => {}
        }

        Ok(CommandResult::success())
    }
}
