//! Key-value blob store contract and implementations.
//!
//! # Responsibility
//! - Define the minimal persistence surface the task repository needs:
//!   read one string value by key, write one string value by key.
//! - Provide the production SQLite implementation and an in-memory
//!   implementation for tests and ephemeral runs.
//!
//! # Invariants
//! - `get` on an absent key is `Ok(None)`, never an error.
//! - `set` replaces the whole value for the key; there are no partial
//!   writes at this boundary.

use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure at the key-value boundary.
///
/// Callers treat read failures as "no stored value" and write failures
/// as a skipped mirror update; neither is fatal to the collection.
#[derive(Debug)]
pub enum StoreError {
    Read(String),
    Write(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(message) => write!(f, "store read failed: {message}"),
            Self::Write(message) => write!(f, "store write failed: {message}"),
        }
    }
}

impl Error for StoreError {}

/// Minimal key-value persistence boundary.
///
/// The task repository is the only intended consumer; it uses exactly one
/// fixed key. Implementations do not interpret the value.
pub trait BlobStore {
    /// Returns the stored value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// SQLite-backed blob store over the `kv_store` table.
///
/// Owns its connection; open one via [`crate::db::open_store`] or
/// [`crate::db::open_store_in_memory`] so migrations are applied first.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| StoreError::Read(err.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now') * 1000)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key, value],
            )
            .map_err(|err| StoreError::Write(err.to_string()))?;
        Ok(())
    }
}

/// In-memory blob store.
///
/// Used as the fake store in repository tests and for throwaway sessions
/// that never touch disk. Clones share the same underlying map, so a test
/// can keep a handle to the data after handing the store to a repository.
/// Write failures can be injected to exercise the repository's
/// swallow-and-log contract.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` fail with a write error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock_inner().fail_writes = fail;
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, MemoryStoreInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock_inner().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut inner = self.lock_inner();
        if inner.fail_writes {
            return Err(StoreError::Write("injected write failure".to_string()));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
