//! REST API controllers.

pub mod bank_controller;
pub mod employee_controller;
pub mod health_controller;

pub use health_controller::*;
