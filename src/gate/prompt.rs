//! Interactive secret entry. Input is read without echoing so the plaintext
//! never appears on the terminal or in scrollback.

use std::io::Write;

use console::Term;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("cannot prompt for a secret on a non-interactive stream")]
    NotATerminal,
    #[error("secret input failed: {0}")]
    ReadFailed(String),
}

/// Non-echoing secret-input collaborator. Implemented by the terminal for the
/// CLI and by in-memory stubs in tests.
pub trait SecretPrompt {
    fn read_secret(&mut self, label: &str) -> Result<String, PromptError>;
}

/// Reads secrets from the controlling terminal with echo disabled.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretPrompt for TerminalPrompt {
    fn read_secret(&mut self, label: &str) -> Result<String, PromptError> {
        if !self.term.is_term() {
            return Err(PromptError::NotATerminal);
        }
        print!("{label}: ");
        std::io::stdout()
            .flush()
            .map_err(|e| PromptError::ReadFailed(format!("{e}")))?;
        self.term
            .read_secure_line()
            .map_err(|e| PromptError::ReadFailed(format!("{e}")))
    }
}
