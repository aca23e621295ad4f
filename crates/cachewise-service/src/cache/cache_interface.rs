//! Cache interface trait for abstracted caching operations.

use cachewise_core::{CachewiseResult, HealthCheck, HealthStatus};
use async_trait::async_trait;
use shaku::Interface;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a cache read.
///
/// `Error` covers an unreachable store, a timed-out call, or a rejected
/// command. It is never propagated past the cache-aside layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The key holds a value.
    Hit(String),
    /// The key is absent or expired.
    Miss,
    /// The store could not answer.
    Error(String),
}

/// Cache interface for storing and retrieving serialized entities.
///
/// Values are JSON strings to keep the trait dyn-compatible.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Reads a raw value.
    async fn get(&self, key: &str) -> CacheLookup;

    /// Stores a value, overwriting any existing entry and resetting its TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CachewiseResult<()>;

    /// Removes a value. Returns `true` if the key existed.
    ///
    /// Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> CachewiseResult<bool>;

    /// Round-trips to the store.
    async fn ping(&self) -> CachewiseResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Readiness probe for the entity cache.
///
/// A failing cache only degrades the service since reads fall back to the
/// repository.
pub struct CacheHealth(pub Arc<dyn CacheInterface>);

#[async_trait]
impl HealthCheck for CacheHealth {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.0.is_enabled() {
            return HealthStatus::Degraded("cache disabled".to_string());
        }
        match self.0.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}
