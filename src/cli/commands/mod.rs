//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Meerkat has no subcommands. [`CommandDispatcher`] runs the shared startup
//! sequence (ensure config, load the version file, query packages) and then
//! routes the selected flag to its command.

pub mod dispatcher;
pub mod notify;
pub mod setup;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use notify::NotifyCommand;
pub use setup::SetupCommand;
