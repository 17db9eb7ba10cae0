//! Notify command implementation.
//!
//! Backs both `meerkat --notify` and `meerkat --dry-run`.

use crate::error::Result;
use crate::notify::{Notifier, NotifyOutcome};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The notify command implementation.
pub struct NotifyCommand {
    notifier: Notifier,
    dry_run: bool,
}

impl NotifyCommand {
    /// Create a new notify command.
    pub fn new(notifier: Notifier, dry_run: bool) -> Self {
        Self { notifier, dry_run }
    }

    /// Whether this run only previews changes.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Command for NotifyCommand {
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.notifier.notify(ui, self.dry_run)? {
            NotifyOutcome::Previewed(count) => {
                tracing::debug!("Dry run found {} changes", count);
            }
            NotifyOutcome::NoChanges => {}
            NotifyOutcome::Delivered(count) => {
                tracing::info!("Reported {} changes", count);
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeerkatConfig;
    use crate::inventory::Inventory;
    use crate::snapshot::SnapshotStore;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn dry_run_command_succeeds() {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path().join("versions.yml"));
        let stored: Inventory = [("foo".to_string(), "1.0".to_string())].into();
        let live: Inventory = [("foo".to_string(), "1.1".to_string())].into();
        let notifier = Notifier::new(MeerkatConfig::default(), store.clone(), stored, live)
            .with_hostname("web01");

        let mut cmd = NotifyCommand::new(notifier, true);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert!(cmd.is_dry_run());
        assert!(result.success);
        assert!(ui.has_message("foo: 1.0 -> 1.1"));
        assert!(!store.exists());
    }
}
