//! JSON codec for cache entries.

use cachewise_core::CachewiseResult;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// A cache entry that could not be turned back into a value.
///
/// Callers treat this as a miss; the next repository read overwrites the
/// bad entry.
#[derive(Debug, Error)]
#[error("Malformed cache entry: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Serializes a value for storage.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> CachewiseResult<String> {
    Ok(serde_json::to_string(value)?)
}

/// Deserializes a stored entry.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}
