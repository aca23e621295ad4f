//! Whole-response cache keyed by request identity.
//!
//! Entries are opaque: status, headers and body are stored as produced and
//! replayed verbatim until they expire. Nothing invalidates them early.

use crate::cache::CacheMetrics;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Default response lifetime.
pub const DEFAULT_RESPONSE_TTL: Duration = Duration::from_secs(10);

/// Default upper bound on stored responses.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// A stored response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

#[derive(Debug)]
struct StoredResponse {
    response: CachedResponse,
    stored_at: Instant,
}

/// Builds the cache key for a request: `METHOD path?query`.
#[must_use]
pub fn request_key(method: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{} {}?{}", method, path, query),
        _ => format!("{} {}", method, path),
    }
}

/// In-process response store with a fixed TTL and bounded capacity.
#[derive(Debug)]
pub struct ResponseCacheStore {
    entries: RwLock<HashMap<String, StoredResponse>>,
    ttl: Duration,
    max_entries: usize,
}

impl ResponseCacheStore {
    /// Creates a store.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored response for `key` if it has not expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        let entries = self.entries.read();
        let hit = entries
            .get(key)
            .filter(|stored| stored.stored_at.elapsed() < self.ttl)
            .map(|stored| stored.response.clone());

        if hit.is_some() {
            debug!("Response cache hit for '{}'", key);
            CacheMetrics::response_hit();
        } else {
            debug!("Response cache miss for '{}'", key);
            CacheMetrics::response_miss();
        }
        hit
    }

    /// Stores a response, replacing any previous entry for `key`.
    ///
    /// At capacity, expired entries are purged first and then the oldest
    /// entry is dropped.
    pub fn put(&self, key: String, response: CachedResponse) {
        let now = Instant::now();
        let mut entries = self.entries.write();

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let ttl = self.ttl;
            entries.retain(|_, stored| now.duration_since(stored.stored_at) < ttl);

            if entries.len() >= self.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, stored)| stored.stored_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            StoredResponse {
                response,
                stored_at: now,
            },
        );
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, stored| stored.stored_at.elapsed() < ttl);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Starts a background task that purges expired entries once per TTL.
    ///
    /// The task stops once every other handle to the store is gone. Returns
    /// `None` outside a tokio runtime.
    pub fn spawn_purge_task(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let weak = Arc::downgrade(self);
        let period = self.ttl;

        Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = weak.upgrade() else {
                    break;
                };
                let purged = store.purge_expired();
                if purged > 0 {
                    debug!("Purged {} expired responses", purged);
                }
            }
        }))
    }
}

impl Default for ResponseCacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE_TTL, DEFAULT_MAX_ENTRIES)
    }
}
