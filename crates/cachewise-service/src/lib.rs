//! # Cachewise Service
//!
//! Business services for cachewise and the cache-aside machinery they sit on.
//!
//! Reads consult the entity cache first and fall back to the repository on a
//! miss, repopulating the cache. Writes go to the repository, then update or
//! evict the affected entry. Cache failures never reach callers.

pub mod bank_service;
pub mod cache;
pub mod dto;
pub mod employee_service;
pub mod r#impl;
pub mod response_cache;

pub use bank_service::*;
pub use cache::*;
pub use dto::*;
pub use employee_service::*;
pub use r#impl::*;
pub use response_cache::*;
