//! Durable result store backed by SQLite
//!
//! One table keyed by fingerprint. Every call round-trips to the database;
//! statements run on the blocking pool behind a connection mutex, so a `put`
//! and a `get` on the same key never interleave mid-statement.

use super::fingerprint::Fingerprint;
use crate::error::{WagecastError, WagecastResult};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS prediction_cache (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fingerprint TEXT NOT NULL UNIQUE,
        result_text TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

/// Fingerprint to estimate text persistence
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Look up a cached estimate. `None` is a miss, not an error.
    async fn get(&self, fingerprint: &Fingerprint) -> WagecastResult<Option<String>>;

    /// Insert or replace the estimate for a fingerprint
    async fn put(&self, fingerprint: &Fingerprint, result_text: &str) -> WagecastResult<()>;
}

/// A persisted cache row
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub id: i64,
    pub fingerprint: Fingerprint,
    pub result_text: String,
    pub created_at: DateTime<Utc>,
}

/// SQLite implementation of [`ResultStore`]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database file and ensure the schema exists
    pub async fn open(path: &Path) -> WagecastResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                WagecastError::io(format!("creating directory {}", parent.display()), e)
            })?;
        }

        let db_path = path.to_path_buf();
        let conn = tokio::task::spawn_blocking(move || -> WagecastResult<Connection> {
            let conn = Connection::open(&db_path).map_err(|e| {
                WagecastError::store(format!("opening {}", db_path.display()), e)
            })?;
            conn.busy_timeout(Duration::from_secs(5))
                .map_err(|e| WagecastError::store("setting busy timeout", e))?;
            init_schema(&conn)?;
            Ok(conn)
        })
        .await
        .map_err(|e| WagecastError::Internal(format!("cache store task failed: {}", e)))??;

        debug!("Opened cache store at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> WagecastResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| WagecastError::store("opening in-memory database", e))?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Full entry for a fingerprint
    pub async fn entry(&self, fingerprint: &Fingerprint) -> WagecastResult<Option<CacheEntry>> {
        let key = fingerprint.as_str().to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, fingerprint, result_text, created_at
                 FROM prediction_cache WHERE fingerprint = ?1",
                params![key],
                row_to_entry,
            )
            .optional()
            .map_err(|e| WagecastError::store("reading cache entry", e))
        })
        .await
    }

    /// Most recent entries first
    pub async fn list(&self, limit: usize) -> WagecastResult<Vec<CacheEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, fingerprint, result_text, created_at
                     FROM prediction_cache ORDER BY created_at DESC, id DESC LIMIT ?1",
                )
                .map_err(|e| WagecastError::store("preparing cache listing", e))?;
            let rows = stmt
                .query_map(params![limit], row_to_entry)
                .map_err(|e| WagecastError::store("listing cache entries", e))?;
            let entries = rows
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| WagecastError::store("reading cache entry", e))?;
            Ok(entries)
        })
        .await
    }

    /// Number of cached estimates
    pub async fn count(&self) -> WagecastResult<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM prediction_cache", [], |row| row.get(0))
                .map_err(|e| WagecastError::store("counting cache entries", e))?;
            Ok(count.max(0) as u64)
        })
        .await
    }

    /// Run a statement against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> WagecastResult<T>
    where
        F: FnOnce(&Connection) -> WagecastResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| WagecastError::Internal("cache store lock poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| WagecastError::Internal(format!("cache store task failed: {}", e)))?
    }
}

#[async_trait]
impl ResultStore for SqliteStore {
    async fn get(&self, fingerprint: &Fingerprint) -> WagecastResult<Option<String>> {
        let key = fingerprint.as_str().to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT result_text FROM prediction_cache WHERE fingerprint = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| WagecastError::store("looking up cached estimate", e))
        })
        .await
    }

    async fn put(&self, fingerprint: &Fingerprint, result_text: &str) -> WagecastResult<()> {
        let key = fingerprint.as_str().to_string();
        let text = result_text.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO prediction_cache (fingerprint, result_text, created_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(fingerprint) DO UPDATE SET
                     result_text = excluded.result_text,
                     created_at = excluded.created_at",
                params![key, text, timestamp(Utc::now())],
            )
            .map_err(|e| WagecastError::store("writing cached estimate", e))?;
            Ok(())
        })
        .await?;

        debug!("Cached estimate {}", fingerprint.short());
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> WagecastResult<()> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| WagecastError::store("creating cache schema", e))
}

/// RFC 3339 in UTC with fixed microsecond precision, so text order is time order
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<CacheEntry> {
    let created_at: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(CacheEntry {
        id: row.get(0)?,
        fingerprint: Fingerprint::from_stored(row.get(1)?),
        result_text: row.get(2)?,
        created_at,
    })
}
