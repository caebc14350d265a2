//! Interactive input.
//!
//! Profile creation asks one question per field, and deletion asks for a
//! `yes`. Both go through [`Prompt::prompt_line`] so callers can script
//! answers. [`TerminalPrompt`] reads from the terminal with `dialoguer`.

use dialoguer::Input;

use crate::error::TemplgenError;

/// The only answer that confirms a destructive action.
pub const AFFIRMATIVE: &str = "yes";

pub trait Prompt {
    /// Show `text` and return the line typed in reply (possibly empty).
    fn prompt_line(&self, text: &str) -> Result<String, TemplgenError>;

    /// Ask a yes/no question. Anything other than the literal
    /// [`AFFIRMATIVE`] answer is a refusal.
    fn confirm(&self, text: &str) -> Result<bool, TemplgenError> {
        Ok(self.prompt_line(text)?.trim() == AFFIRMATIVE)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn prompt_line(&self, text: &str) -> Result<String, TemplgenError> {
        Input::<String>::new()
            .with_prompt(text.trim_end().trim_end_matches(':'))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| TemplgenError::PromptFailed(e.to_string()))
    }
}
