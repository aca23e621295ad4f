//! Entity cache infrastructure for the service layer.
//!
//! [`CacheInterface`] abstracts the key-value store. [`RedisCacheService`] is
//! the production backend and [`InMemoryCache`] has the same contract for
//! tests and local runs. [`CacheAside`] layers the read-through and
//! write-through protocol on top of either.

mod cache_aside;
mod cache_interface;
pub mod cache_keys;
pub mod cache_metrics;
pub mod codec;
mod memory_cache;
mod redis_cache;

pub use cache_aside::CacheAside;
pub use cache_interface::{CacheHealth, CacheInterface, CacheLookup};
pub use cache_metrics::CacheMetrics;
pub use codec::DecodeError;
pub use memory_cache::InMemoryCache;
#[cfg(test)]
pub(crate) use redis_cache::test_support;
pub use redis_cache::{
    RedisCacheService, RedisCacheServiceParameters, DEFAULT_ENTITY_TTL, DEFAULT_INSTANCE_NAME,
    DEFAULT_OPERATION_TIMEOUT,
};
