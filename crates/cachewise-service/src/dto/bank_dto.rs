//! Bank-related DTOs.

use cachewise_core::Bank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bank catalogue together with the moment it was produced.
///
/// `fetched_at` changes on every handler run, which makes a cached response
/// distinguishable from a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BankListing {
    pub banks: Vec<Bank>,
    pub fetched_at: DateTime<Utc>,
}

impl BankListing {
    /// Stamps the listing with the current time.
    #[must_use]
    pub fn now(banks: Vec<Bank>) -> Self {
        Self {
            banks,
            fetched_at: Utc::now(),
        }
    }
}
