//! Durable singleton storage for the hashed master secret. The repository
//! trait hides all query text so the verification gate never depends on a
//! concrete storage engine.

mod sqlite;

pub use sqlite::SqliteCredentialStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
    #[error("no master secret configured")]
    NotConfigured,
    #[error("credential store read failed: {0}")]
    ReadFailed(String),
    #[error("credential store write failed: {0}")]
    WriteFailed(String),
}

/// Storage contract for the single hashed master secret. "Configured" means
/// exactly one record exists.
pub trait CredentialRepository {
    /// Returns whether a master secret has been stored. An unreachable store
    /// is an error, never a silent `false`.
    fn is_configured(&self) -> Result<bool, StoreError>;

    /// Inserts or replaces the singleton record. `hash` must already be a
    /// digest; this operation never hashes. The write is atomic: on failure
    /// the store is unchanged.
    fn upsert_hash(&self, hash: &str) -> Result<(), StoreError>;

    /// Returns the stored digest, or `StoreError::NotConfigured` when no
    /// record exists. I/O failures surface as `StoreError::ReadFailed`.
    fn stored_hash(&self) -> Result<String, StoreError>;
}
