//! Cache key generators for consistent key naming.
//!
//! Keys have the shape `cache:{kind}:id:{id}` for single entities and
//! `cache:{kind}:list` for collections. The Redis client prepends its
//! instance name, so a stored key reads `cachewise:cache:employee:id:42`.

use cachewise_core::{Bank, CacheEntity, Employee, EmployeeId};
use std::fmt::Display;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "cache";

/// Sentinel segment for collection entries. Never collides with `id:` keys.
const LIST_SENTINEL: &str = "list";

/// Generate a cache key for a single entity of type `E`.
#[must_use]
pub fn entity_by_id<E: CacheEntity>(id: impl Display) -> String {
    format!("{}:{}:id:{}", CACHE_PREFIX, E::KIND, id)
}

/// Generate the cache key for the full collection of `E`.
#[must_use]
pub fn entity_list<E: CacheEntity>() -> String {
    format!("{}:{}:{}", CACHE_PREFIX, E::KIND, LIST_SENTINEL)
}

/// Generate a cache key for an employee by ID.
#[must_use]
pub fn employee_by_id(id: EmployeeId) -> String {
    entity_by_id::<Employee>(id)
}

/// Generate the cache key for the employee collection.
#[must_use]
pub fn employee_list() -> String {
    entity_list::<Employee>()
}

/// Generate the cache key for the bank collection.
#[must_use]
pub fn bank_list() -> String {
    entity_list::<Bank>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_by_id_key() {
        assert_eq!(employee_by_id(EmployeeId::new(42)), "cache:employee:id:42");
    }

    #[test]
    fn test_collection_keys() {
        assert_eq!(employee_list(), "cache:employee:list");
        assert_eq!(bank_list(), "cache:bank:list");
    }

    #[test]
    fn test_keys_are_deterministic() {
        assert_eq!(employee_by_id(EmployeeId::new(7)), employee_by_id(EmployeeId::new(7)));
    }

    #[test]
    fn test_distinct_targets_get_distinct_keys() {
        let a = employee_by_id(EmployeeId::new(1));
        let b = employee_by_id(EmployeeId::new(11));
        assert_ne!(a, b);
        assert_ne!(a, employee_list());
        assert_ne!(employee_list(), bank_list());
        assert_ne!(entity_by_id::<Bank>(1), a);
    }
}
