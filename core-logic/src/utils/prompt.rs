use crate::error::InputError;
use crate::traits::Prompter;
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io;

/// Terminal [`Prompter`] backed by `dialoguer`.
///
/// Without an interactive terminal every read fails with [`InputError::Closed`].
pub struct TermPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }

    fn read(&self, label: &str) -> Result<String, InputError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(|dialoguer::Error::IO(e)| input_error(e))
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        self.read(&prompt_label(prompt))
    }

    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        match self.read("") {
            Ok(line) => Ok(Some(line)),
            Err(InputError::Closed) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn notice(&mut self, message: &str) -> Result<(), InputError> {
        self.term.write_line(message)?;
        Ok(())
    }
}

/// The theme adds its own separator, so surrounding blanks and a trailing
/// colon are dropped from the prompt text.
fn prompt_label(prompt: &str) -> String {
    prompt.trim().trim_end_matches(':').trim_end().to_string()
}

/// End of input and a missing terminal both mean no more answers.
fn input_error(err: io::Error) -> InputError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::NotConnected => InputError::Closed,
        _ => InputError::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_label_strips_layout() {
        assert_eq!(
            prompt_label("\nEnter the amount of TKN to send: "),
            "Enter the amount of TKN to send"
        );
        assert_eq!(
            prompt_label("How many addresses do you want? (or type 'custom' to use your own list) "),
            "How many addresses do you want? (or type 'custom' to use your own list)"
        );
        assert_eq!(prompt_label("Choice (1/2): "), "Choice (1/2)");
        assert_eq!(prompt_label(""), "");
    }

    #[test]
    fn test_eof_and_missing_terminal_close_input() {
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(input_error(eof), InputError::Closed));

        let no_tty = io::Error::new(io::ErrorKind::NotConnected, "not a terminal");
        assert!(matches!(input_error(no_tty), InputError::Closed));
    }

    #[test]
    fn test_other_io_errors_are_kept() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(input_error(err), InputError::Io { .. }));
    }
}
