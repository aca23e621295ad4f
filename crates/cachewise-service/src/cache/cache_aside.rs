//! Read-through and write-through helpers over a [`CacheInterface`].

use super::{cache_metrics::CacheMetrics, codec, CacheInterface, CacheLookup};
use cachewise_core::CachewiseResult;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Cache-aside protocol bound to one cache and one entry TTL.
///
/// Holds no mutable state. Every cache failure is logged and swallowed here;
/// only errors produced by the loader escape.
#[derive(Clone)]
pub struct CacheAside {
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl CacheAside {
    /// Creates a coordinator writing entries with the given TTL.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Entry lifetime applied on every write.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Reads and decodes `key`. Misses, store errors and corrupt entries all
    /// come back as `None`.
    pub async fn lookup<T: DeserializeOwned>(&self, kind: &'static str, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            CacheLookup::Hit(raw) => match codec::decode(&raw) {
                Ok(value) => {
                    CacheMetrics::hit(kind);
                    Some(value)
                }
                Err(e) => {
                    warn!("Discarding unreadable cache entry '{}': {}", key, e);
                    CacheMetrics::miss(kind);
                    None
                }
            },
            CacheLookup::Miss => {
                CacheMetrics::miss(kind);
                None
            }
            CacheLookup::Error(e) => {
                warn!("Cache unavailable for '{}', falling back to repository: {}", key, e);
                CacheMetrics::miss(kind);
                None
            }
        }
    }

    /// Encodes and stores `value` under `key`.
    pub async fn populate<T: Serialize + Sync + ?Sized>(&self, key: &str, value: &T) {
        let raw = match codec::encode(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not encode value for '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &raw, self.ttl).await {
            warn!("Failed to populate cache entry '{}': {}", key, e);
            CacheMetrics::error("set");
        }
    }

    /// Removes `key` from the cache.
    pub async fn evict(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(existed) => debug!("Evicted '{}' (present: {})", key, existed),
            Err(e) => {
                warn!("Failed to evict cache entry '{}': {}", key, e);
                CacheMetrics::error("delete");
            }
        }
    }

    /// Returns the cached value for `key`, or runs `load` and caches its
    /// result. Nothing is written when `load` fails.
    pub async fn read_through<T, F, Fut>(
        &self,
        kind: &'static str,
        key: &str,
        load: F,
    ) -> CachewiseResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CachewiseResult<T>> + Send,
    {
        if let Some(cached) = self.lookup::<T>(kind, key).await {
            debug!("Serving '{}' from cache", key);
            return Ok(cached);
        }

        let value = load().await?;
        self.populate(key, &value).await;
        Ok(value)
    }
}

impl std::fmt::Debug for CacheAside {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAside")
            .field("enabled", &self.cache.is_enabled())
            .field("ttl", &self.ttl)
            .finish()
    }
}
