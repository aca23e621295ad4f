//! # Cachewise Repository
//!
//! Data access for cachewise. The service layer only sees the traits in
//! [`traits`]; the relational store is the source of truth for employees,
//! and banks come from a fixed in-memory catalogue.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn EmployeeRepository>
//! MySqlEmployeeRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
