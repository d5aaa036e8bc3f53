//! Operator input
//!
//! Every question the wizard asks goes through [`Prompter`]. The terminal
//! implementation uses inquire; tests substitute scripted answers.

use crate::error::{Result, WizardError};
use crate::wizard::render::wizard_render_config;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

/// Source of operator answers
pub trait Prompter {
    /// Single choice from `options`; returns the chosen index
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize>;

    /// Free text, pre-filled with `default` when given
    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Masked secret entry; the value is never echoed
    fn password(&mut self, message: &str) -> Result<String>;
}

/// Prompts on the attached terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        Select::new(message, options.to_vec())
            .with_render_config(wizard_render_config())
            .with_help_message("↑↓ to move, Enter to select, Esc to cancel")
            .with_page_size(8)
            .raw_prompt()
            .map(|choice| choice.index)
            .map_err(|e| prompt_error(message, e))
    }

    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let mut prompt = Text::new(message).with_render_config(wizard_render_config());
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        prompt.prompt().map_err(|e| prompt_error(message, e))
    }

    fn password(&mut self, message: &str) -> Result<String> {
        Password::new(message)
            .with_render_config(wizard_render_config())
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .map_err(|e| prompt_error(message, e))
    }
}

/// Map inquire failures onto wizard errors; a missing TTY fails fast
fn prompt_error(message: &str, err: InquireError) -> WizardError {
    match err {
        InquireError::NotTTY => WizardError::NonInteractive {
            prompt: message.to_string(),
        },
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            WizardError::Cancelled
        }
        other => WizardError::Prompt {
            prompt: message.to_string(),
            message: other.to_string(),
        },
    }
}
