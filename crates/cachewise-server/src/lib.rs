//! # Cachewise Server Library
//!
//! Dependency injection wiring, logging and metrics setup, and startup
//! output for the cachewise binary.

pub mod di;
pub mod startup;
pub mod telemetry;
