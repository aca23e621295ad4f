//! Result type aliases for cachewise.

use crate::CachewiseError;

/// A specialized `Result` type for cachewise operations.
pub type CachewiseResult<T> = Result<T, CachewiseError>;
