//! Bank entity.

use crate::{BankId, CacheEntity};
use serde::{Deserialize, Serialize};

/// A bank branch. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Bank {
    pub bank_id: BankId,
    pub bank_name: Option<String>,
    pub address: Option<String>,
    pub branch_code: Option<String>,
}

impl Bank {
    /// Creates a fully populated bank record.
    #[must_use]
    pub fn new(bank_id: i32, bank_name: &str, address: &str, branch_code: &str) -> Self {
        Self {
            bank_id: BankId(bank_id),
            bank_name: Some(bank_name.to_string()),
            address: Some(address.to_string()),
            branch_code: Some(branch_code.to_string()),
        }
    }
}

impl CacheEntity for Bank {
    const KIND: &'static str = "bank";
}
