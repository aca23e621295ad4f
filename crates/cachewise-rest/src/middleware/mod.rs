//! HTTP middleware.

mod logging;
mod response_cache;

pub use logging::*;
pub use response_cache::*;
