use std::{
    fmt,
    io::{self, BufRead},
};

use dialoguer::{theme::ColorfulTheme, Input};

use crate::cli::core::CommandError;
use crate::cli::output;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Yes/no gate consulted before destructive commands.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, CommandError>;
}

/// Only a case-insensitive `y` counts as agreement.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Interactive confirmation through a dialoguer text prompt.
pub struct PromptConfirm {
    theme: ColorfulTheme,
}

impl PromptConfirm {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for PromptConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, CommandError> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(is_affirmative(&answer))
    }
}

/// Line source for script mode. Confirmation prompts consume the next line,
/// so a script answers `reset` on the line that follows it.
pub struct ScriptInput<R> {
    reader: R,
}

impl<R: BufRead> ScriptInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next line without its terminator; `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R: BufRead> Confirm for ScriptInput<R> {
    fn confirm(&mut self, prompt: &str) -> Result<bool, CommandError> {
        output::prompt(format!("{prompt}: "));
        let answer = self.next_line()?.unwrap_or_default();
        Ok(is_affirmative(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn only_y_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" y "));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
    }

    #[test]
    fn script_input_strips_line_endings() {
        let mut input = ScriptInput::new(Cursor::new("add income 5\r\noverview\n"));
        assert_eq!(input.next_line().unwrap().as_deref(), Some("add income 5"));
        assert_eq!(input.next_line().unwrap().as_deref(), Some("overview"));
        assert_eq!(input.next_line().unwrap(), None);
    }

    #[test]
    fn script_confirmation_reads_following_line() {
        let mut input = ScriptInput::new(Cursor::new("Y\nn\n"));
        assert!(input.confirm("Please enter 'y' to confirm").unwrap());
        assert!(!input.confirm("Please enter 'y' to confirm").unwrap());
        assert!(!input.confirm("Please enter 'y' to confirm").unwrap());
    }
}
