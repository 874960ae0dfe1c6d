//! Verification core: digest computation, the admission decision, and the
//! interactive prompt seam. Each submodule has a single responsibility so the
//! security model stays simple and auditable.

pub mod auth;
pub mod digest;
pub mod prompt;

pub use auth::{AuthGate, GateError};
pub use prompt::{PromptError, SecretPrompt, TerminalPrompt};
