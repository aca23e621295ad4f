//! In-memory repository implementations.

mod bank_repository;

pub use bank_repository::*;
