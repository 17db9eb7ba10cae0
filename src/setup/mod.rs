//! Interactive setup wizard.
//!
//! The wizard walks a fixed sequence of states:
//!
//! ```text
//! CollectPath -> CollectPackages -> CollectChannels
//!     -> [CollectWebhookUrl -> ConfirmSchedule] -> Commit
//! ```
//!
//! Cancelling any prompt moves to `Abort`, which clears the screen and
//! leaves every file untouched. Nothing is written before `Commit`, except
//! a boot job the user explicitly agreed to in `ConfirmSchedule`.
//!
//! Invalid answers are re-asked in an interactive UI. A non-interactive UI
//! would answer the same way forever, so there they fail with a validation
//! error instead.

use std::path::PathBuf;

use crate::config::{validate, Channel, ConfigStore, MeerkatConfig};
use crate::error::{MeerkatError, Result};
use crate::inventory::{Inventory, PackageBackend};
use crate::schedule::Scheduler;
use crate::snapshot::SnapshotStore;
use crate::ui::{Prompt, PromptOption, PromptResult, PromptType, UserInterface};

/// Prompt key for the snapshot location.
pub const KEY_WATCHER_FILE_PATH: &str = "watcher_file_path";
/// Prompt key for the package checklist.
pub const KEY_WATCHED_PACKAGES: &str = "watched_packages";
/// Prompt key for the channel checklist.
pub const KEY_NOTIFICATIONS: &str = "notifications";
/// Prompt key for the Discord webhook URL.
pub const KEY_DISCORD_WEBHOOK_URL: &str = "discord_webhook_url";
/// Prompt key for the boot job confirmation.
pub const KEY_CREATE_BOOT_JOB: &str = "create_boot_job";

pub const EMPTY_PATH_MESSAGE: &str = "Path cannot be empty! Please enter a value.";
pub const NO_PACKAGES_MESSAGE: &str = "You must select at least one package!";
pub const NO_NOTIFICATIONS_MESSAGE: &str = "You must select at least one notification!";
pub const EMPTY_URL_MESSAGE: &str = "Url cannot be empty! Please enter a value.";

/// A step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    CollectPath,
    CollectPackages,
    CollectChannels,
    CollectWebhookUrl,
    ConfirmSchedule,
    Commit,
    Abort,
}

/// How the wizard ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The configuration and a fresh snapshot were written.
    Committed(MeerkatConfig),
    /// The user cancelled; nothing was written.
    Aborted,
}

/// Collects a configuration from the user and persists it.
pub struct SetupWizard<'a> {
    store: ConfigStore,
    backend: &'a dyn PackageBackend,
    scheduler: &'a mut dyn Scheduler,
    scheduled_command: String,
}

/// Answers gathered so far.
struct Draft {
    config: MeerkatConfig,
    installed: Option<Inventory>,
}

impl<'a> SetupWizard<'a> {
    /// Create a wizard.
    ///
    /// `scheduled_command` is the command line registered as a boot job.
    pub fn new(
        store: ConfigStore,
        backend: &'a dyn PackageBackend,
        scheduler: &'a mut dyn Scheduler,
        scheduled_command: impl Into<String>,
    ) -> Self {
        Self {
            store,
            backend,
            scheduler,
            scheduled_command: scheduled_command.into(),
        }
    }

    /// Run the wizard, starting from `current` as the pre-filled answers.
    pub fn run(
        &mut self,
        ui: &mut dyn UserInterface,
        current: MeerkatConfig,
    ) -> Result<WizardOutcome> {
        ui.show_header("Meerkat setup");

        let mut draft = Draft {
            config: current,
            installed: None,
        };
        let mut state = WizardState::CollectPath;

        loop {
            tracing::debug!("Setup wizard state: {:?}", state);
            state = match state {
                WizardState::CollectPath => self.collect_path(ui, &mut draft)?,
                WizardState::CollectPackages => self.collect_packages(ui, &mut draft)?,
                WizardState::CollectChannels => self.collect_channels(ui, &mut draft)?,
                WizardState::CollectWebhookUrl => self.collect_webhook_url(ui, &mut draft)?,
                WizardState::ConfirmSchedule => self.confirm_schedule(ui)?,
                WizardState::Commit => {
                    self.commit(ui, &draft.config)?;
                    return Ok(WizardOutcome::Committed(draft.config));
                }
                WizardState::Abort => {
                    ui.clear_screen();
                    tracing::info!("Setup cancelled; nothing written");
                    return Ok(WizardOutcome::Aborted);
                }
            };
        }
    }

    fn collect_path(
        &mut self,
        ui: &mut dyn UserInterface,
        draft: &mut Draft,
    ) -> Result<WizardState> {
        let current = draft
            .config
            .general
            .watcher_file_path
            .to_string_lossy()
            .into_owned();

        let prompt = Prompt {
            key: KEY_WATCHER_FILE_PATH.to_string(),
            question: "Where should package versions be stored?".to_string(),
            prompt_type: PromptType::Input,
            default: non_empty(current),
        };

        let Some(answer) = ask(ui, &prompt)? else {
            return Ok(WizardState::Abort);
        };
        let path = answer.as_string().trim().to_string();
        if path.is_empty() {
            reject(ui, EMPTY_PATH_MESSAGE)?;
            return Ok(WizardState::CollectPath);
        }

        draft.config.general.watcher_file_path = PathBuf::from(path);
        Ok(WizardState::CollectPackages)
    }

    fn collect_packages(
        &mut self,
        ui: &mut dyn UserInterface,
        draft: &mut Draft,
    ) -> Result<WizardState> {
        let installed = match &draft.installed {
            Some(installed) => installed.clone(),
            None => {
                let installed = self.list_packages(ui)?;
                draft.installed = Some(installed.clone());
                installed
            }
        };

        if installed.is_empty() {
            return Err(MeerkatError::ConfigValidation {
                message: format!("No installed packages reported by {}", self.backend.name()),
            });
        }

        let options = installed
            .iter()
            .map(|(name, version)| PromptOption {
                label: format!("{} ({})", name, version),
                value: name.clone(),
            })
            .collect();
        let checked: Vec<&str> = draft
            .config
            .general
            .watched_packages
            .iter()
            .filter(|name| installed.contains_key(*name))
            .map(String::as_str)
            .collect();

        let prompt = Prompt {
            key: KEY_WATCHED_PACKAGES.to_string(),
            question: "Select the packages to watch".to_string(),
            prompt_type: PromptType::MultiSelect { options },
            default: non_empty(checked.join(",")),
        };

        let Some(answer) = ask(ui, &prompt)? else {
            return Ok(WizardState::Abort);
        };
        let selected: Vec<String> = match answer {
            PromptResult::Strings(values) => values
                .into_iter()
                .filter(|name| installed.contains_key(name))
                .collect(),
            _ => Vec::new(),
        };
        if selected.is_empty() {
            reject(ui, NO_PACKAGES_MESSAGE)?;
            return Ok(WizardState::CollectPackages);
        }

        draft.config.general.watched_packages = selected.into_iter().collect();
        Ok(WizardState::CollectChannels)
    }

    fn collect_channels(
        &mut self,
        ui: &mut dyn UserInterface,
        draft: &mut Draft,
    ) -> Result<WizardState> {
        let options = Channel::ALL
            .iter()
            .map(|channel| PromptOption {
                label: channel.label().to_string(),
                value: channel.label().to_string(),
            })
            .collect();
        let checked: Vec<&str> = draft
            .config
            .general
            .selected_notifications
            .iter()
            .map(Channel::label)
            .collect();

        let prompt = Prompt {
            key: KEY_NOTIFICATIONS.to_string(),
            question: "Select how to be notified".to_string(),
            prompt_type: PromptType::MultiSelect { options },
            default: non_empty(checked.join(",")),
        };

        let Some(answer) = ask(ui, &prompt)? else {
            return Ok(WizardState::Abort);
        };
        let selected: Vec<Channel> = match answer {
            PromptResult::Strings(values) => values
                .iter()
                .filter_map(|label| Channel::from_label(label))
                .collect(),
            _ => Vec::new(),
        };
        if selected.is_empty() {
            reject(ui, NO_NOTIFICATIONS_MESSAGE)?;
            return Ok(WizardState::CollectChannels);
        }

        draft.config.general.selected_notifications = selected.into_iter().collect();
        if draft.config.is_enabled(Channel::DiscordWebhook) {
            Ok(WizardState::CollectWebhookUrl)
        } else {
            Ok(WizardState::Commit)
        }
    }

    fn collect_webhook_url(
        &mut self,
        ui: &mut dyn UserInterface,
        draft: &mut Draft,
    ) -> Result<WizardState> {
        let prompt = Prompt {
            key: KEY_DISCORD_WEBHOOK_URL.to_string(),
            question: "Discord webhook URL".to_string(),
            prompt_type: PromptType::Input,
            default: non_empty(draft.config.notifications.discord_webhook.url.clone()),
        };

        let Some(answer) = ask(ui, &prompt)? else {
            return Ok(WizardState::Abort);
        };
        let url = answer.as_string().trim().to_string();
        if url.is_empty() {
            reject(ui, EMPTY_URL_MESSAGE)?;
            return Ok(WizardState::CollectWebhookUrl);
        }

        draft.config.notifications.discord_webhook.url = url;
        Ok(WizardState::ConfirmSchedule)
    }

    fn confirm_schedule(&mut self, ui: &mut dyn UserInterface) -> Result<WizardState> {
        let command = self.scheduled_command.clone();

        if !self.scheduler.is_available() {
            ui.warning(&format!(
                "No crontab available. To check at every boot, schedule `{}` yourself.",
                command
            ));
            return Ok(WizardState::Commit);
        }

        match self.scheduler.has_existing_entry(&command) {
            Ok(true) => {
                tracing::debug!("Boot job already present: {}", command);
                return Ok(WizardState::Commit);
            }
            Ok(false) => {}
            Err(e) => {
                ui.warning(&format!("Could not read crontab: {}", e));
                return Ok(WizardState::Commit);
            }
        }

        let prompt = Prompt {
            key: KEY_CREATE_BOOT_JOB.to_string(),
            question: "Check for package changes at every boot?".to_string(),
            prompt_type: PromptType::Confirm,
            // Headless setups answer from the default; only an explicit yes registers.
            default: Some("false".to_string()),
        };

        let Some(answer) = ask(ui, &prompt)? else {
            return Ok(WizardState::Abort);
        };
        if answer.as_bool() == Some(true) {
            match self.scheduler.register_at_boot(&command) {
                Ok(()) => ui.success("Boot job registered"),
                Err(e) => ui.warning(&format!("Could not register boot job: {}", e)),
            }
        }

        Ok(WizardState::Commit)
    }

    fn commit(&mut self, ui: &mut dyn UserInterface, config: &MeerkatConfig) -> Result<()> {
        validate(config)?;
        self.store.save(config)?;

        let snapshot = self
            .backend
            .list_installed(&config.general.watched_packages)?;
        let snapshots = SnapshotStore::new(&config.general.watcher_file_path);
        snapshots.save(&snapshot)?;

        ui.success(&format!(
            "Configuration saved to {}",
            self.store.path().display()
        ));
        ui.success(&format!(
            "Recorded {} package versions in {}",
            snapshot.len(),
            snapshots.path().display()
        ));
        Ok(())
    }

    fn list_packages(&self, ui: &mut dyn UserInterface) -> Result<Inventory> {
        let mut spinner = ui.start_spinner("Reading installed packages...");
        match self.backend.list_all() {
            Ok(installed) => {
                spinner.finish_success(&format!(
                    "Found {} installed packages ({})",
                    installed.len(),
                    self.backend.name()
                ));
                Ok(installed)
            }
            Err(e) => {
                spinner.finish_error("Could not read installed packages");
                Err(e)
            }
        }
    }
}

/// Show a prompt; `None` means the user cancelled.
fn ask(ui: &mut dyn UserInterface, prompt: &Prompt) -> Result<Option<PromptResult>> {
    let answer = ui.prompt(prompt)?;
    if answer.is_cancelled() {
        tracing::debug!("Prompt '{}' cancelled", prompt.key);
        return Ok(None);
    }
    Ok(Some(answer))
}

/// Report an invalid answer so the step is asked again.
fn reject(ui: &mut dyn UserInterface, message: &str) -> Result<()> {
    if !ui.is_interactive() {
        return Err(MeerkatError::ConfigValidation {
            message: message.to_string(),
        });
    }
    ui.error(message);
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
