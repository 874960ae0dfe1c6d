//! The admission decision: hash the candidate, fetch the stored digest,
//! compare. Plaintext exists only inside these calls and is zeroed before
//! they return.

use console::style;
use thiserror::Error;
use tracing::info;
use zeroize::Zeroize;

use crate::gate::digest::sha256_hex;
use crate::gate::prompt::{PromptError, SecretPrompt};
use crate::store::{CredentialRepository, StoreError};

#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Stateless verification gate over an injected credential repository.
pub struct AuthGate {
    store: Box<dyn CredentialRepository>,
}

impl AuthGate {
    pub fn with_store(store: Box<dyn CredentialRepository>) -> Self {
        Self { store }
    }

    /// Returns whether a master secret has been configured.
    pub fn is_configured(&self) -> Result<bool, GateError> {
        Ok(self.store.is_configured()?)
    }

    /// Hashes and persists a new master secret. The plaintext is consumed
    /// and zeroed before this returns.
    pub fn set_secret(&self, mut plaintext: String) -> Result<(), GateError> {
        let hash = sha256_hex(plaintext.as_bytes());
        plaintext.zeroize();
        self.store.upsert_hash(&hash)?;
        Ok(())
    }

    /// Returns true iff the candidate's digest matches the stored digest
    /// byte for byte. An unconfigured store surfaces as
    /// `StoreError::NotConfigured`, never as a mismatch.
    pub fn verify(&self, plaintext: &str) -> Result<bool, GateError> {
        let candidate = sha256_hex(plaintext.as_bytes());
        let stored = self.store.stored_hash()?;
        // Plain equality on hex digests; this gate does not defend against
        // local timing measurement.
        let matched = candidate == stored;
        info!(matched, "master secret verification");
        Ok(matched)
    }

    /// Prompts for the secret (non-echoing) and verifies it, printing a
    /// user-visible rejection on mismatch. The message reveals nothing about
    /// the stored record.
    pub fn prompt_and_verify(&self, prompt: &mut dyn SecretPrompt) -> Result<bool, GateError> {
        let mut plaintext = prompt.read_secret("Enter master password")?;
        let verified = self.verify(&plaintext)?;
        plaintext.zeroize();
        if !verified {
            eprintln!("{}", style("Invalid master password.").red());
        }
        Ok(verified)
    }
}
