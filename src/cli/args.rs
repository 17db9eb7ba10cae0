//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Meerkat - watch installed package versions and report changes.
#[derive(Debug, Parser)]
#[command(name = "meerkat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run the setup wizard
    #[arg(short, long)]
    pub config: bool,

    /// Check watched packages and send notifications for changes
    #[arg(short, long)]
    pub notify: bool,

    /// Print changes without notifying or updating the version file
    #[arg(short, long)]
    pub dry_run: bool,

    /// Path to the configuration file
    #[arg(
        long,
        env = "MEERKAT_CONFIG",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config_file: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// The single action an invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Setup,
    Notify,
    DryRun,
    Help,
}

impl Cli {
    /// Pick the action; `--config` wins over `--notify`, which wins over
    /// `--dry-run`.
    pub fn action(&self) -> Action {
        if self.config {
            Action::Setup
        } else if self.notify {
            Action::Notify
        } else if self.dry_run {
            Action::DryRun
        } else {
            Action::Help
        }
    }
}

/// Rendered `--help` output.
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}
