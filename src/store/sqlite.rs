//! SQLite-backed credential repository. Every operation opens and releases
//! its own connection so no handle outlives a single call.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{CredentialRepository, StoreError};

/// Fixed primary key of the singleton record.
const SINGLETON_ID: i64 = 1;

pub struct SqliteCredentialStore {
    path: PathBuf,
}

impl SqliteCredentialStore {
    /// Points the store at a database file. The file is created lazily on
    /// first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, StoreError> {
        let conn =
            Connection::open(&self.path).map_err(|e| StoreError::Unavailable(format!("{e}")))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS master_password (
                id INTEGER PRIMARY KEY,
                password_hash TEXT NOT NULL
            )",
        )
        .map_err(|e| StoreError::Unavailable(format!("{e}")))?;
        debug!(path = %self.path.display(), "credential store opened");
        Ok(conn)
    }
}

impl CredentialRepository for SqliteCredentialStore {
    fn is_configured(&self) -> Result<bool, StoreError> {
        let conn = self.open()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM master_password", [], |row| row.get(0))
            .map_err(|e| StoreError::ReadFailed(format!("{e}")))?;
        Ok(count > 0)
    }

    fn upsert_hash(&self, hash: &str) -> Result<(), StoreError> {
        if hash.is_empty() {
            return Err(StoreError::WriteFailed(
                "refusing to store an empty hash".to_string(),
            ));
        }
        let conn = self.open()?;
        // Single statement keyed on the fixed id: the record is either fully
        // written or not written at all.
        conn.execute(
            "INSERT INTO master_password (id, password_hash) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET password_hash = excluded.password_hash",
            params![SINGLETON_ID, hash],
        )
        .map_err(|e| StoreError::WriteFailed(format!("{e}")))?;
        info!("master secret record stored");
        Ok(())
    }

    fn stored_hash(&self) -> Result<String, StoreError> {
        let conn = self.open()?;
        let hash: Option<String> = conn
            .query_row(
                "SELECT password_hash FROM master_password WHERE id = ?1",
                params![SINGLETON_ID],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::ReadFailed(format!("{e}")))?;
        match hash {
            Some(hash) => {
                debug!("master secret record found");
                Ok(hash)
            }
            None => {
                info!("master secret record not found");
                Err(StoreError::NotConfigured)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::{tempdir, TempDir};

    use super::{CredentialRepository, SqliteCredentialStore, StoreError};
    use crate::gate::digest::sha256_hex;

    fn store_in(dir: &TempDir) -> SqliteCredentialStore {
        SqliteCredentialStore::new(dir.path().join("credentials.db"))
    }

    #[test]
    fn fresh_store_is_unconfigured() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);
        assert!(!store.is_configured().expect("check should succeed"));
        assert!(matches!(
            store.stored_hash(),
            Err(StoreError::NotConfigured)
        ));
    }

    #[test]
    fn stores_and_returns_the_hash() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);
        let hash = sha256_hex(b"correct-horse");
        store.upsert_hash(&hash).expect("write should succeed");
        assert!(store.is_configured().expect("check should succeed"));
        assert_eq!(store.stored_hash().expect("read should succeed"), hash);
    }

    #[test]
    fn upsert_replaces_the_singleton_record() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);
        store
            .upsert_hash(&sha256_hex(b"first"))
            .expect("first write should succeed");
        store
            .upsert_hash(&sha256_hex(b"second"))
            .expect("second write should succeed");
        assert_eq!(
            store.stored_hash().expect("read should succeed"),
            sha256_hex(b"second")
        );

        let conn = Connection::open(store.path()).expect("open for inspection");
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM master_password", [], |row| row.get(0))
            .expect("count should succeed");
        assert_eq!(rows, 1);
    }

    #[test]
    fn rejects_an_empty_hash() {
        let dir = tempdir().expect("temp dir");
        let store = store_in(&dir);
        let err = store.upsert_hash("").unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert!(!store.is_configured().expect("check should succeed"));
    }

    #[test]
    fn rejected_write_leaves_the_store_unchanged() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("credentials.db");
        // Pre-create the table with a constraint the digest cannot satisfy,
        // so the engine itself rejects the write.
        let conn = Connection::open(&path).expect("open for setup");
        conn.execute_batch(
            "CREATE TABLE master_password (
                id INTEGER PRIMARY KEY,
                password_hash TEXT NOT NULL CHECK(length(password_hash) > 100)
            )",
        )
        .expect("setup schema");
        drop(conn);

        let store = SqliteCredentialStore::new(&path);
        let err = store.upsert_hash(&sha256_hex(b"secret")).unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert!(!store.is_configured().expect("check should still succeed"));
        assert!(matches!(
            store.stored_hash(),
            Err(StoreError::NotConfigured)
        ));
    }

    #[test]
    fn unopenable_store_reports_unavailable() {
        let dir = tempdir().expect("temp dir");
        // A directory path can never be opened as a database file.
        let store = SqliteCredentialStore::new(dir.path());
        assert!(matches!(
            store.is_configured(),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.stored_hash(),
            Err(StoreError::Unavailable(_))
        ));
    }
}
