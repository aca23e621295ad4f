//! Prometheus metrics for the entity cache and the response cache gate.

use metrics::{counter, describe_counter};

/// Metric names.
pub mod names {
    /// Entity cache hits.
    pub const CACHE_HITS_TOTAL: &str = "cachewise_cache_hits_total";
    /// Entity cache misses, including undecodable entries.
    pub const CACHE_MISSES_TOTAL: &str = "cachewise_cache_misses_total";
    /// Entity cache operations that failed and were absorbed.
    pub const CACHE_ERRORS_TOTAL: &str = "cachewise_cache_errors_total";
    /// Response gate hits.
    pub const RESPONSE_CACHE_HITS_TOTAL: &str = "cachewise_response_cache_hits_total";
    /// Response gate misses.
    pub const RESPONSE_CACHE_MISSES_TOTAL: &str = "cachewise_response_cache_misses_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Entity cache lookups answered from the cache");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Entity cache lookups that fell through to the repository");
    describe_counter!(names::CACHE_ERRORS_TOTAL, "Entity cache operations that failed and were absorbed");
    describe_counter!(names::RESPONSE_CACHE_HITS_TOTAL, "Responses served from the response cache");
    describe_counter!(names::RESPONSE_CACHE_MISSES_TOTAL, "Responses produced by a handler");
}

/// Cache metrics recorder.
#[derive(Clone, Copy, Debug)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record an entity cache hit for the given entity kind.
    pub fn hit(kind: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "kind" => kind).increment(1);
    }

    /// Record an entity cache miss for the given entity kind.
    pub fn miss(kind: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "kind" => kind).increment(1);
    }

    /// Record an absorbed cache failure for the given operation.
    pub fn error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a response gate hit.
    pub fn response_hit() {
        counter!(names::RESPONSE_CACHE_HITS_TOTAL).increment(1);
    }

    /// Record a response gate miss.
    pub fn response_miss() {
        counter!(names::RESPONSE_CACHE_MISSES_TOTAL).increment(1);
    }
}
