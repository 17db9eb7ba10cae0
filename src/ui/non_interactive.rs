//! Non-interactive UI for cron and other headless runs.

use std::collections::HashMap;

use crate::error::{MeerkatError, Result};

use super::{split_values, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "MEERKAT_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `MEERKAT_PROMPT_<KEY>` variables, then from
/// the prompt's default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new() -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self { env_overrides }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self {
            env_overrides: overrides,
        }
    }
}

impl Default for NonInteractiveUI {
    fn default() -> Self {
        Self::new()
    }
}

fn answer(prompt_type: &PromptType, value: &str) -> PromptResult {
    match prompt_type {
        PromptType::Confirm => PromptResult::Bool(matches!(
            value.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        )),
        PromptType::Input => PromptResult::String(value.to_string()),
        PromptType::MultiSelect { .. } => PromptResult::Strings(split_values(value)),
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(answer(&prompt.prompt_type, value));
        }

        if let Some(default) = &prompt.default {
            return Ok(answer(&prompt.prompt_type, default));
        }

        Err(MeerkatError::ConfigValidation {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (no default value)",
                prompt.key
            ),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("  {}", message);
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", title);
    }

    fn clear_screen(&mut self) {}

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only reports how the operation finished.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("  ✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }
}
