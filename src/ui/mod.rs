//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for cron and other headless runs
//! - [`MockUI`] for tests
//!
//! Every prompt can be cancelled. Cancellation is a normal
//! [`PromptResult::Cancelled`] value, not an error, so callers decide
//! what aborting means for them.
//!
//! # Example
//!
//! ```
//! use meerkat::ui::{create_ui, UserInterface};
//!
//! // Non-interactive mode for testability
//! let mut ui = create_ui(false);
//! ui.message("Watching 3 packages");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod prompts;
pub mod spinner;
pub mod terminal;

pub use mock::{MockUI, SpinnerStatus, CANCEL_RESPONSE};
pub use non_interactive::NonInteractiveUI;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, should_use_colors, TerminalUI, Tone};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Clear the screen.
    fn clear_screen(&mut self);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for overrides and lookup).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Pre-filled value. For multi-select, comma-separated checked values.
    pub default: Option<String>,
}

/// The type of prompt.
#[derive(Debug, Clone)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
    /// Select multiple from a list of options.
    MultiSelect { options: Vec<PromptOption> },
}

/// An option in a select prompt.
#[derive(Debug, Clone)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input.
    String(String),
    /// Multiple string results from multi-select.
    Strings(Vec<String>),
    /// The user dismissed the prompt.
    Cancelled,
}

impl PromptResult {
    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
            Self::Strings(v) => v.join(","),
            Self::Cancelled => String::new(),
        }
    }

    /// Get as bool if this is a Bool result.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Check whether the prompt was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Split a comma-separated prompt value, dropping empty entries.
pub(crate) fn split_values(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_result_as_string() {
        assert_eq!(PromptResult::Bool(true).as_string(), "true");
        assert_eq!(PromptResult::String("hello".into()).as_string(), "hello");
        assert_eq!(
            PromptResult::Strings(vec!["a".into(), "b".into()]).as_string(),
            "a,b"
        );
        assert_eq!(PromptResult::Cancelled.as_string(), "");
    }

    #[test]
    fn prompt_result_as_bool() {
        assert_eq!(PromptResult::Bool(true).as_bool(), Some(true));
        assert_eq!(PromptResult::String("true".into()).as_bool(), None);
        assert_eq!(PromptResult::Cancelled.as_bool(), None);
    }

    #[test]
    fn cancelled_is_detected() {
        assert!(PromptResult::Cancelled.is_cancelled());
        assert!(!PromptResult::Strings(vec![]).is_cancelled());
    }

    #[test]
    fn split_values_drops_empty_entries() {
        assert_eq!(split_values(""), Vec::<String>::new());
        assert_eq!(split_values("nginx, curl,,"), vec!["nginx", "curl"]);
    }
}
