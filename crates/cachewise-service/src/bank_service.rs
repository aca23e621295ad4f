//! Bank service.

use crate::dto::BankListing;
use cachewise_core::{CachewiseResult, Interface};
use cachewise_repository::BankRepository;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Bank service trait.
#[async_trait]
pub trait BankService: Interface + Send + Sync {
    /// Returns the bank catalogue stamped with the fetch time.
    async fn list_banks(&self) -> CachewiseResult<BankListing>;
}

/// Bank service backed by a [`BankRepository`].
#[derive(Component)]
#[shaku(interface = BankService)]
pub struct BankServiceComponent {
    #[shaku(inject)]
    bank_repository: Arc<dyn BankRepository>,
}

impl BankServiceComponent {
    /// Creates a new bank service.
    #[must_use]
    pub fn new(bank_repository: Arc<dyn BankRepository>) -> Self {
        Self { bank_repository }
    }
}

#[async_trait]
impl BankService for BankServiceComponent {
    async fn list_banks(&self) -> CachewiseResult<BankListing> {
        debug!("Listing banks");
        let banks = self.bank_repository.find_all().await?;
        Ok(BankListing::now(banks))
    }
}

impl std::fmt::Debug for BankServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankServiceComponent").finish_non_exhaustive()
    }
}
