//! Redis-based cache implementation.

use super::{cache_metrics::CacheMetrics, CacheInterface, CacheLookup};
use cachewise_core::{CachewiseError, CachewiseResult};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default TTL for cached entities (10 minutes).
pub const DEFAULT_ENTITY_TTL: Duration = Duration::from_secs(600);

/// Upper bound for a single Redis round-trip.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(500);

/// Default key prefix for this deployment.
pub const DEFAULT_INSTANCE_NAME: &str = "cachewise";

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
    /// Prefix prepended to every key.
    #[shaku(default = DEFAULT_INSTANCE_NAME.to_string())]
    instance_name: String,
    /// Bound on each cache operation.
    #[shaku(default = DEFAULT_OPERATION_TIMEOUT)]
    operation_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service with default settings.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self::with_settings(pool, DEFAULT_INSTANCE_NAME, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Create a cache service with an explicit key prefix and timeout.
    #[must_use]
    pub fn with_settings(pool: Arc<Pool>, instance_name: &str, operation_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            instance_name: instance_name.to_string(),
            operation_timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            instance_name: DEFAULT_INSTANCE_NAME.to_string(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Returns the key as stored in Redis.
    fn namespaced(&self, key: &str) -> String {
        if self.instance_name.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.instance_name, key)
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> CachewiseResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CachewiseError::cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CachewiseError::cache("Cache is disabled")),
        }
    }

    /// Runs a cache operation under the configured timeout.
    async fn bounded<T, F>(&self, operation: &str, fut: F) -> CachewiseResult<T>
    where
        F: Future<Output = CachewiseResult<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(CachewiseError::Timeout(format!(
                "Cache {} exceeded {:?}",
                operation, self.operation_timeout
            ))),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get(&self, key: &str) -> CacheLookup {
        if !self.is_enabled() {
            return CacheLookup::Miss;
        }

        let full_key = self.namespaced(key);
        let result = self
            .bounded("get", async {
                let mut conn = self.get_conn().await?;
                let value: Option<String> = conn.get(&full_key).await.map_err(|e| {
                    CachewiseError::cache(format!("Failed to get key '{}': {}", full_key, e))
                })?;
                Ok::<_, CachewiseError>(value)
            })
            .await;

        match result {
            Ok(Some(value)) => {
                debug!("Cache hit for key '{}'", full_key);
                CacheLookup::Hit(value)
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", full_key);
                CacheLookup::Miss
            }
            Err(e) => {
                warn!("Cache read failed for key '{}': {}", full_key, e);
                CacheMetrics::error("get");
                CacheLookup::Error(e.to_string())
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CachewiseResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let full_key = self.namespaced(key);
        let ttl_secs = ttl.as_secs().max(1);

        self.bounded("set", async {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(&full_key, value, ttl_secs)
                .await
                .map_err(|e| {
                    CachewiseError::cache(format!("Failed to set key '{}': {}", full_key, e))
                })
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", full_key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CachewiseResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let full_key = self.namespaced(key);
        let deleted: i64 = self
            .bounded("delete", async {
                let mut conn = self.get_conn().await?;
                conn.del(&full_key).await.map_err(|e| {
                    CachewiseError::cache(format!("Failed to delete key '{}': {}", full_key, e))
                })
            })
            .await?;

        debug!("Deleted key '{}': {}", full_key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> CachewiseResult<()> {
        self.bounded("ping", async {
            let mut conn = self.get_conn().await?;
            let _: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| CachewiseError::cache(format!("Ping failed: {}", e)))?;
            Ok::<_, CachewiseError>(())
        })
        .await
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .field("instance_name", &self.instance_name)
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use deadpool_redis::{Config, Runtime};

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
        assert_eq!(cache.get("cache:employee:id:1").await, CacheLookup::Miss);
        assert!(cache.set("k", "v", DEFAULT_ENTITY_TTL).await.is_ok());
        assert!(!cache.delete("k").await.unwrap());
    }

    #[test]
    fn test_instance_prefix() {
        let cache = RedisCacheService::disabled();
        assert_eq!(
            cache.namespaced("cache:employee:list"),
            "cachewise:cache:employee:list"
        );
    }

    #[tokio::test]
    async fn test_unreachable_store_is_lookup_error() {
        // Nothing listens on port 1, so every call fails fast or times out.
        let pool = Config::from_url("redis://127.0.0.1:1")
            .create_pool(Some(Runtime::Tokio1))
            .unwrap();
        let cache = RedisCacheService::with_settings(
            Arc::new(pool),
            "test",
            Duration::from_millis(200),
        );

        assert!(matches!(cache.get("cache:employee:id:1").await, CacheLookup::Error(_)));
        assert!(cache.set("k", "v", DEFAULT_ENTITY_TTL).await.is_err());
        assert!(cache.delete("k").await.is_err());
        assert!(cache.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_unresponsive_store_times_out() {
        let bound = Duration::from_millis(200);
        let cache = test_support::unresponsive_cache(bound).await;

        let started = std::time::Instant::now();
        let lookup = cache.get("cache:employee:id:1").await;
        let elapsed = started.elapsed();

        match lookup {
            CacheLookup::Error(message) => assert!(message.contains("exceeded"), "{}", message),
            other => panic!("expected a lookup error, got {:?}", other),
        }
        assert!(elapsed >= bound);
        assert!(elapsed < Duration::from_secs(2));

        let started = std::time::Instant::now();
        let result = cache.set("k", "v", DEFAULT_ENTITY_TTL).await;
        assert!(matches!(result, Err(CachewiseError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
