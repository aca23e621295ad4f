//! Fixed in-memory bank catalogue.

use crate::traits::BankRepository;
use cachewise_core::{Bank, CachewiseResult};
use async_trait::async_trait;
use shaku::Component;
use tracing::debug;

/// Returns the built-in bank branches.
#[must_use]
pub fn seeded_banks() -> Vec<Bank> {
    vec![
        Bank::new(1, "State Bank of India", "Hitech city", "FNB001"),
        Bank::new(2, "Punjab National Bank", "Madhapur", "GB002"),
        Bank::new(3, "Bank of Baroda", "Ameerpet", "BB006"),
    ]
}

/// Bank repository serving a fixed list held in memory.
#[derive(Component, Debug, Clone)]
#[shaku(interface = BankRepository)]
pub struct StaticBankRepository {
    #[shaku(default = seeded_banks())]
    banks: Vec<Bank>,
}

impl StaticBankRepository {
    /// Creates a repository over the given banks.
    #[must_use]
    pub fn new(banks: Vec<Bank>) -> Self {
        Self { banks }
    }
}

impl Default for StaticBankRepository {
    fn default() -> Self {
        Self::new(seeded_banks())
    }
}

#[async_trait]
impl BankRepository for StaticBankRepository {
    async fn find_all(&self) -> CachewiseResult<Vec<Bank>> {
        debug!("Listing {} banks", self.banks.len());
        Ok(self.banks.clone())
    }
}
