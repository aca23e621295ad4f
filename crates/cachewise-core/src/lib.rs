//! # Cachewise Core
//!
//! Core types, domain entities, and error definitions shared by every
//! layer of the cachewise service.

pub mod domain;
pub mod error;
pub mod id;
pub mod money;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use money::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
