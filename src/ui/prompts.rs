//! Interactive prompts.
//!
//! Esc or `q` dismisses confirm and checklist prompts; Ctrl-C dismisses
//! any prompt. Both come back as [`PromptResult::Cancelled`].

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect};

use crate::error::{MeerkatError, Result};

use super::{split_values, Prompt, PromptOption, PromptResult, PromptType};

/// Turn an interrupted read into a cancellation, anything else into an error.
fn cancelled_or_err(e: dialoguer::Error) -> Result<PromptResult> {
    let err: std::io::Error = e.into();
    if err.kind() == std::io::ErrorKind::Interrupted {
        Ok(PromptResult::Cancelled)
    } else {
        Err(MeerkatError::Io(err))
    }
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::MultiSelect { options } => prompt_multiselect(prompt, options, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_ref()
        .map(|s| s.to_lowercase() == "true" || s == "y" || s == "yes")
        .unwrap_or(true);

    let theme = prompt_theme();
    match Confirm::with_theme(&theme)
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on_opt(term)
    {
        Ok(Some(answer)) => Ok(PromptResult::Bool(answer)),
        Ok(None) => Ok(PromptResult::Cancelled),
        Err(e) => cancelled_or_err(e),
    }
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    if let Some(default) = &prompt.default {
        input = input.with_initial_text(default.clone());
    }

    match input.interact_text_on(term) {
        Ok(value) => Ok(PromptResult::String(value)),
        Err(e) => cancelled_or_err(e),
    }
}

fn prompt_multiselect(
    prompt: &Prompt,
    options: &[PromptOption],
    term: &Term,
) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_values = prompt
        .default
        .as_deref()
        .map(split_values)
        .unwrap_or_default();
    let defaults: Vec<bool> = options
        .iter()
        .map(|o| default_values.contains(&o.value))
        .collect();

    let theme = prompt_theme();
    let selections = match MultiSelect::with_theme(&theme)
        .with_prompt(&prompt.question)
        .items(&labels)
        .defaults(&defaults)
        .interact_on_opt(term)
    {
        Ok(Some(selections)) => selections,
        Ok(None) => return Ok(PromptResult::Cancelled),
        Err(e) => return cancelled_or_err(e),
    };

    let values: Vec<String> = selections
        .iter()
        .map(|&i| options[i].value.clone())
        .collect();

    Ok(PromptResult::Strings(values))
}
