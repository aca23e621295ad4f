//! Application state for Axum handlers.

use cachewise_core::HealthCheck;
use cachewise_repository::{DatabaseHealth, DatabasePoolInterface};
use cachewise_service::{BankService, CacheHealth, CacheInterface, EmployeeService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub employee_service: Arc<dyn EmployeeService>,
    pub bank_service: Arc<dyn BankService>,
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        employee_service: Arc<dyn EmployeeService>,
        bank_service: Arc<dyn BankService>,
    ) -> Self {
        Self {
            employee_service,
            bank_service,
            health_checks: Arc::new(Vec::new()),
        }
    }

    /// Adds a dependency probed by the readiness endpoint.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        Arc::make_mut(&mut self.health_checks).push(check);
        self
    }

    /// Resolves services and readiness probes from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn EmployeeService>
            + HasComponent<dyn BankService>
            + HasComponent<dyn DatabasePoolInterface>
            + HasComponent<dyn CacheInterface>,
    {
        let employee_service: Arc<dyn EmployeeService> = module.resolve();
        let bank_service: Arc<dyn BankService> = module.resolve();
        let pool: Arc<dyn DatabasePoolInterface> = module.resolve();
        let cache: Arc<dyn CacheInterface> = module.resolve();

        Self::new(employee_service, bank_service)
            .with_health_check(Arc::new(DatabaseHealth(pool)))
            .with_health_check(Arc::new(CacheHealth(cache)))
    }
}
