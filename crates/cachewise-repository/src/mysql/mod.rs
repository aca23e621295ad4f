//! MySQL repository implementations.

mod employee_repository;

pub use employee_repository::*;
