//! SQLite Store Module
//!
//! Durable cache backend. One row per key, timestamps stored as unix milliseconds.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::cache::{CacheBackend, CacheEntry};
use crate::error::CacheError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS cached_resource (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    created_at INTEGER NOT NULL
)";

// == SQLite Store ==
/// Cache backend persisted in a SQLite database.
///
/// The connection sits behind a mutex and every statement runs on the
/// blocking thread pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("conn", &"<sqlite>")
            .finish()
    }
}

impl SqliteStore {
    // == Open ==
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Write(e.to_string()))?;
        }

        let conn = Connection::open(path).map_err(|e| CacheError::Write(e.to_string()))?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))
            .map_err(|e| CacheError::Write(e.to_string()))?;
        Self::init(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory().map_err(|e| CacheError::Write(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, CacheError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| CacheError::Write(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T, String>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| "sqlite connection mutex poisoned".to_string())?;
            op(&guard).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    }
}

#[async_trait]
impl CacheBackend for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let key = key.to_string();
        let row = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT value, created_at FROM cached_resource WHERE key = ?1",
                    params![key],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
            })
            .await
            .map_err(CacheError::Read)?;

        match row {
            Some((value, created_ms)) => {
                let created_at = DateTime::from_timestamp_millis(created_ms).ok_or_else(|| {
                    CacheError::Read(format!("invalid created_at timestamp {}", created_ms))
                })?;
                Ok(Some(CacheEntry::with_created_at(value, created_at)))
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let key = key.to_string();
        let value = value.to_string();
        let created_ms = created_at.timestamp_millis();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO cached_resource (key, value, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, created_at = excluded.created_at",
                params![key, value, created_ms],
            )
        })
        .await
        .map(|_| ())
        .map_err(CacheError::Write)
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<usize, CacheError> {
        let cutoff_ms = cutoff.timestamp_millis();

        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM cached_resource WHERE created_at < ?1",
                params![cutoff_ms],
            )
        })
        .await
        .map_err(CacheError::Write)
    }
}
