/// Persistent credential storage
///
/// The only value ever persisted by the application is the 4-digit vault
/// PIN, stored under a single fixed key. The store is injected into the
/// access gate as a collaborator so the gate itself stays testable without
/// a database on disk.

use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;

/// The one key the application ever writes
pub const PIN_KEY: &str = "chowhub_pin";

/// Errors surfaced by the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not create data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value storage boundary for the stored credential
pub trait CredentialStore {
    /// Read a value, `None` if the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// SQLite-backed store, one row per key.
///
/// The database file lives in the user's data directory:
/// - Linux: ~/.local/share/chowhub/chowhub.db
/// - macOS: ~/Library/Application Support/chowhub/chowhub.db
/// - Windows: %APPDATA%\chowhub\chowhub.db
pub struct PinStore {
    conn: Connection,
    db_path: PathBuf,
}

impl PinStore {
    /// Open (or create) the settings database and initialize its schema
    pub fn new() -> Result<Self, StoreError> {
        let db_path = Self::db_path();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;

        println!("📁 Settings database at: {}", db_path.display());

        Ok(PinStore { conn, db_path })
    }

    /// Get the path where the database should be stored
    fn db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("chowhub");
        path.push("chowhub.db");
        path
    }
}

impl CredentialStore for PinStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        use rusqlite::OptionalExtension;

        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for PinStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}

/// In-memory store used by the unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
