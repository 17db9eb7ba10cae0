//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use meerkat::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("watcher_file_path", "/tmp/versions.yml");
//!
//! ui.message("Starting setup");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Starting setup".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::Result;

use super::{split_values, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Response that makes a prompt come back as cancelled.
pub const CANCEL_RESPONSE: &str = "<cancel>";

/// Mock UI implementation for testing.
///
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked more than once.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    spinner_outcomes: Rc<RefCell<Vec<(SpinnerStatus, String)>>>,
    screen_clears: usize,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    ///
    /// Use [`CANCEL_RESPONSE`] to simulate the user dismissing the prompt.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How each spinner finished, in order, with its final message.
    ///
    /// A spinner dropped without finishing leaves no entry.
    pub fn spinner_outcomes(&self) -> Vec<(SpinnerStatus, String)> {
        self.spinner_outcomes.borrow().clone()
    }

    /// How many times the screen was cleared.
    pub fn screen_clears(&self) -> usize {
        self.screen_clears
    }

    /// Keys of every prompt shown, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a message was captured.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a success message was captured.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if an error was captured.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a warning was captured.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    fn next_response(&mut self, key: &str) -> Option<String> {
        if let Some(response) = self.prompt_queues.get_mut(key).and_then(VecDeque::pop_front) {
            return Some(response);
        }
        self.prompt_responses.get(key).cloned()
    }
}

fn to_result(prompt_type: &PromptType, response: &str) -> PromptResult {
    if response == CANCEL_RESPONSE {
        return PromptResult::Cancelled;
    }
    match prompt_type {
        PromptType::Confirm => {
            PromptResult::Bool(matches!(response, "true" | "yes" | "y" | "1"))
        }
        PromptType::Input => PromptResult::String(response.to_string()),
        PromptType::MultiSelect { .. } => PromptResult::Strings(split_values(response)),
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(response) = self.next_response(&prompt.key) {
            return Ok(to_result(&prompt.prompt_type, &response));
        }

        if let Some(default) = &prompt.default {
            return Ok(to_result(&prompt.prompt_type, default));
        }

        // Type-appropriate empty answer
        Ok(match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(false),
            PromptType::Input => PromptResult::String(String::new()),
            PromptType::MultiSelect { .. } => PromptResult::Strings(Vec::new()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            outcomes: Rc::clone(&self.spinner_outcomes),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn clear_screen(&mut self) {
        self.screen_clears += 1;
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// How a spinner started through [`MockUI`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

/// Reports its finish back to the `MockUI` that started it.
struct MockSpinner {
    outcomes: Rc<RefCell<Vec<(SpinnerStatus, String)>>>,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push((SpinnerStatus::Success, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push((SpinnerStatus::Error, msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn input(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Question?".to_string(),
            prompt_type: PromptType::Input,
            default: default.map(String::from),
        }
    }

    fn multiselect(key: &str) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Pick".to_string(),
            prompt_type: PromptType::MultiSelect {
                options: vec![PromptOption {
                    label: "curl".to_string(),
                    value: "curl".to_string(),
                }],
            },
            default: None,
        }
    }

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Failed");

        assert_eq!(ui.messages(), &["Hello"]);
        assert!(ui.has_success("Done"));
        assert!(ui.has_warning("Careful"));
        assert!(ui.has_error("Failed"));
    }

    #[test]
    fn mock_ui_prompt_with_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("path", "/tmp/x.yml");

        let result = ui.prompt(&input("path", Some("/var/y.yml"))).unwrap();
        assert_eq!(result, PromptResult::String("/tmp/x.yml".to_string()));
        assert_eq!(ui.prompts_shown(), &["path"]);
    }

    #[test]
    fn mock_ui_prompt_falls_back_to_default() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&input("path", Some("/var/y.yml"))).unwrap();
        assert_eq!(result, PromptResult::String("/var/y.yml".to_string()));
    }

    #[test]
    fn mock_ui_queued_responses_come_first() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("url", vec!["", "https://example.test/hook"]);
        ui.set_prompt_response("url", "fallback");

        assert_eq!(ui.prompt(&input("url", None)).unwrap().as_string(), "");
        assert_eq!(
            ui.prompt(&input("url", None)).unwrap().as_string(),
            "https://example.test/hook"
        );
        assert_eq!(ui.prompt(&input("url", None)).unwrap().as_string(), "fallback");
    }

    #[test]
    fn mock_ui_cancel_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("watched_packages", CANCEL_RESPONSE);
        let result = ui.prompt(&multiselect("watched_packages")).unwrap();
        assert!(result.is_cancelled());
    }

    #[test]
    fn mock_ui_empty_multiselect_response_is_empty_selection() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("watched_packages", "");
        let result = ui.prompt(&multiselect("watched_packages")).unwrap();
        assert_eq!(result, PromptResult::Strings(vec![]));
    }

    #[test]
    fn mock_ui_confirm_parses_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("ok", "yes");
        let prompt = Prompt {
            key: "ok".to_string(),
            question: "Ok?".to_string(),
            prompt_type: PromptType::Confirm,
            default: None,
        };
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(true));
    }

    #[test]
    fn mock_ui_counts_screen_clears() {
        let mut ui = MockUI::new();
        ui.clear_screen();
        ui.clear_screen();
        assert_eq!(ui.screen_clears(), 2);
    }

    #[test]
    fn mock_ui_set_interactive() {
        let mut ui = MockUI::new();
        assert!(!ui.is_interactive());
        ui.set_interactive(true);
        assert!(ui.is_interactive());
    }

    #[test]
    fn mock_ui_records_spinner_outcomes() {
        let mut ui = MockUI::new();

        let mut listing = ui.start_spinner("Listing");
        listing.finish_error("boom");
        let mut retry = ui.start_spinner("Retrying");
        retry.finish_success("Found 2");
        drop(ui.start_spinner("Abandoned"));

        assert_eq!(ui.spinners(), &["Listing", "Retrying", "Abandoned"]);
        assert_eq!(
            ui.spinner_outcomes(),
            vec![
                (SpinnerStatus::Error, "boom".to_string()),
                (SpinnerStatus::Success, "Found 2".to_string()),
            ]
        );
    }

    #[test]
    fn mock_ui_records_headers() {
        let mut ui = MockUI::new();
        ui.show_header("Meerkat setup");
        assert_eq!(ui.headers(), &["Meerkat setup"]);
    }
}
