//! Cache-aside fetch path over the provider cache table.
//!
//! Two-tier key-value store: an in-memory LRU in front of a SQLite table.
//! Reads prefer a fresh cached payload; misses hit the provider and
//! schedule a fire-and-forget write-back. Cache-store failures never
//! block the request path; they are logged and bypassed.

use lru::LruCache;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::football::http::ApiFootballClient;

/// Default freshness window for cached provider payloads.
pub const DEFAULT_TTL_HOURS: u64 = 24;

/// Cache keys longer than this are truncated; distinct parameter sets can
/// collide past the cut. Accepted, not resolved.
pub const MAX_KEY_LEN: usize = 255;

const MEMORY_ENTRIES: usize = 128;

/// How a `fetch_cached` call was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Refreshed,
}

/// Derive the cache key for an endpoint + parameter set.
///
/// Endpoint and parameters are concatenated in call order, every char
/// outside `[A-Za-z0-9_]` becomes `_`, and the result is truncated to
/// [`MAX_KEY_LEN`].
pub fn cache_key(endpoint: &str, params: &[(&str, String)]) -> String {
    let mut raw = String::from(endpoint);
    for (name, value) in params {
        raw.push('_');
        raw.push_str(name);
        raw.push('_');
        raw.push_str(value);
    }

    let mut key: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    key.truncate(MAX_KEY_LEN);
    key
}

/// A cached provider payload with its write timestamp.
#[derive(Debug, Clone)]
pub struct CachedPayload {
    /// JSON text of the provider's `response` array.
    pub payload: String,
    /// Unix seconds of the last write.
    pub updated_at: u64,
}

impl CachedPayload {
    /// Whether this entry is still within the freshness window.
    pub fn is_fresh(&self, ttl: Duration, now_secs: u64) -> bool {
        now_secs.saturating_sub(self.updated_at) <= ttl.as_secs()
    }
}

/// Key-value store for provider payloads: LRU memory tier over a SQLite
/// table. Cheap to clone; clones share both tiers.
#[derive(Clone)]
pub struct CacheStore {
    conn: Arc<Mutex<Connection>>,
    memory: Arc<Mutex<LruCache<String, CachedPayload>>>,
}

impl CacheStore {
    /// Open (or create) the cache table in the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_conn(Connection::open(path)?)
    }

    /// In-memory store, used by tests and ephemeral runs.
    pub fn in_memory() -> Result<Self> {
        Self::from_conn(Connection::open_in_memory()?)
    }

    fn from_conn(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS api_cache (
                query_key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            memory: Arc::new(Mutex::new(LruCache::new(
                NonZeroUsize::new(MEMORY_ENTRIES).expect("nonzero cache capacity"),
            ))),
        })
    }

    /// Look up a payload. Store errors are logged and reported as a miss so
    /// the caller falls through to the provider.
    pub fn get(&self, key: &str) -> Option<CachedPayload> {
        if let Some(entry) = self.memory.lock().unwrap().get(key) {
            return Some(entry.clone());
        }

        match self.get_from_db(key) {
            Ok(Some(entry)) => {
                self.memory
                    .lock()
                    .unwrap()
                    .put(key.to_string(), entry.clone());
                Some(entry)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "cache read bypassed");
                None
            }
        }
    }

    /// Store a payload in both tiers, superseding any previous entry.
    pub fn put(&self, key: &str, payload: &str) -> Result<()> {
        let entry = CachedPayload {
            payload: payload.to_string(),
            updated_at: now_secs(),
        };

        self.conn.lock().unwrap().execute(
            "INSERT INTO api_cache (query_key, payload, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(query_key) DO UPDATE SET
                 payload = excluded.payload,
                 updated_at = excluded.updated_at",
            params![key, entry.payload, entry.updated_at],
        )?;

        self.memory.lock().unwrap().put(key.to_string(), entry);
        Ok(())
    }

    fn get_from_db(&self, key: &str) -> Result<Option<CachedPayload>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT payload, updated_at FROM api_cache WHERE query_key = ?")?;

        let result = stmt.query_row(params![key], |row| {
            Ok(CachedPayload {
                payload: row.get(0)?,
                updated_at: row.get(1)?,
            })
        });

        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl ApiFootballClient {
    /// Fetch an endpoint's response array, preferring a cached copy no
    /// older than the client's TTL unless `force_refresh` is set.
    ///
    /// A fresh, non-empty cached array short-circuits the provider call.
    /// Otherwise the provider is queried; a non-empty result is written
    /// back on a spawned task the caller never waits on, and returned
    /// regardless of the write's outcome. Provider errors propagate;
    /// cache-store errors are logged and swallowed.
    pub async fn fetch_cached(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        force_refresh: bool,
    ) -> Result<(Vec<Value>, CacheStatus)> {
        let key = cache_key(endpoint, query);

        if !force_refresh {
            if let Some(entry) = self.cache().get(&key) {
                if entry.is_fresh(self.ttl(), now_secs()) {
                    match serde_json::from_str::<Vec<Value>>(&entry.payload) {
                        Ok(rows) if !rows.is_empty() => {
                            tracing::debug!(key = %key, "cache hit");
                            return Ok((rows, CacheStatus::Hit));
                        }
                        Ok(_) => {}
                        Err(err) => {
                            tracing::warn!(key = %key, error = %err, "discarding undecodable cache entry");
                        }
                    }
                }
            }
        }

        let rows = self.get_envelope(endpoint, query).await?;

        if !rows.is_empty() {
            let store = self.cache().clone();
            let payload = serde_json::to_string(&rows)?;
            tokio::task::spawn_blocking(move || {
                if let Err(err) = store.put(&key, &payload) {
                    tracing::warn!(key = %key, error = %err, "cache write-back failed");
                }
            });
        }

        let status = if force_refresh {
            CacheStatus::Refreshed
        } else {
            CacheStatus::Miss
        };
        Ok((rows, status))
    }
}
