//! Interactive terminal UI.

use console::{Style, Term};
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, NonInteractiveUI, ProgressSpinner, Prompt, PromptResult, SpinnerHandle,
    UserInterface,
};

/// Kind of status line shown after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something was saved, found, or registered.
    Success,
    /// The wizard carries on, but the user should know.
    Warning,
    /// The run is about to fail.
    Error,
}

impl Tone {
    fn icon(self) -> &'static str {
        match self {
            Tone::Success => "✓",
            Tone::Warning => "⚠",
            Tone::Error => "✗",
        }
    }

    fn style(self) -> Style {
        match self {
            Tone::Success => Style::new().green(),
            Tone::Warning => Style::new().yellow(),
            Tone::Error => Style::new().red().bold(),
        }
    }

    /// Prefix `msg` with this tone's icon, colored when `colored` is set.
    pub fn line(self, msg: &str, colored: bool) -> String {
        let text = format!("{} {}", self.icon(), msg);
        if colored {
            self.style().apply_to(text).to_string()
        } else {
            text
        }
    }
}

/// Whether stdout should get ANSI colors.
///
/// Honors `NO_COLOR` (https://no-color.org/).
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && Term::stdout().is_term()
}

fn banner(title: &str, colored: bool) -> String {
    if colored {
        format!(
            "{} {}",
            Style::new().cyan().bold().apply_to("::"),
            Style::new().bold().apply_to(title)
        )
    } else {
        format!(":: {}", title)
    }
}

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    err: Term,
    colored: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            err: Term::stderr(),
            colored: should_use_colors(),
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", Tone::Success.line(msg, self.colored)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", Tone::Warning.line(msg, self.colored)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", Tone::Error.line(msg, self.colored)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message, self.colored))
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.term, "\n{}\n", banner(title, self.colored)).ok();
    }

    fn clear_screen(&mut self) {
        self.term.clear_screen().ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
///
/// Falls back to [`NonInteractiveUI`] when stdout is not a terminal.
pub fn create_ui(interactive: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new())
    } else {
        Box::new(NonInteractiveUI::new())
    }
}
