//! # Cachewise REST
//!
//! HTTP surface for cachewise built on Axum. Handlers are thin: they parse
//! the request, call a service, and map the result or error to a response.
//! The bank listing sits behind a short-lived whole-response cache.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
