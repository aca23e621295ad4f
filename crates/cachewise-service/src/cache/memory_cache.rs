//! In-process cache with the same contract as the Redis backend.

use super::{CacheInterface, CacheLookup};
use cachewise_core::{CachewiseError, CachewiseResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache with per-entry TTL and lazy expiry.
///
/// Expiry uses the tokio clock so tests can drive it with
/// `tokio::time::pause` and `advance`. Failures can be switched on to
/// simulate an unreachable store.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail (or stop failing).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Stores a raw value without going through the codec.
    pub fn insert_raw(&self, key: &str, value: &str, ttl: Duration) {
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Returns the live value for `key`, if any.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock();
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    /// Number of successful `set` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> CachewiseResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CachewiseError::cache("In-memory cache unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> CacheLookup {
        if let Err(e) = self.check_available() {
            return CacheLookup::Error(e.to_string());
        }

        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => CacheLookup::Hit(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                CacheLookup::Miss
            }
            None => CacheLookup::Miss,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CachewiseResult<()> {
        self.check_available()?;
        self.insert_raw(key, value, ttl);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CachewiseResult<bool> {
        self.check_available()?;
        let removed = self.entries.lock().remove(key);
        Ok(removed.is_some_and(|entry| entry.expires_at > Instant::now()))
    }

    async fn ping(&self) -> CachewiseResult<()> {
        self.check_available()
    }
}
