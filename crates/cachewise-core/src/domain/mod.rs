//! Domain entities.

mod bank;
mod employee;

pub use bank::*;
pub use employee::*;
