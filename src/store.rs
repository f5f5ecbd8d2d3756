//! Persistent key/value storage for enrichment entries
//!
//! Backends implement [`KeyValueStore`]; [`SharedStore`] puts one backend behind a
//! single store-wide reader/writer lock. Reads run concurrently, a write excludes
//! everything else. Writes are rare compared to reads, so one lock is enough.

use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, RwLock};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Byte-oriented key/value backend
pub trait KeyValueStore: Send + Sync {
    /// Value for `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()>;
}

/// SQLite-backed store, one row per key
pub struct SqliteStore {
    // rusqlite connections are not Sync
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store file
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        log::info!("Opened store: {}", path.display());
        Self::with_connection(conn)
    }

    /// Store that lives only as long as the process
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS entries (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let value: Option<Vec<u8>> = conn
            .query_row(
                "SELECT value FROM entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        // An empty value counts as absent
        Ok(value.filter(|v| !v.is_empty()))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        let conn = self.conn.get_mut().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO entries (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory store, for tests and throwaway runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).filter(|v| !v.is_empty()).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// A backend behind one store-wide reader/writer lock
pub struct SharedStore {
    inner: RwLock<Box<dyn KeyValueStore>>,
}

impl SharedStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: RwLock::new(Box::new(backend)),
        }
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let store = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        store.get(key)
    }

    pub fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut store = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        store.set(key, value)
    }
}
