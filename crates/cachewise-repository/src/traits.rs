//! Repository trait definitions.

use cachewise_core::{Bank, CachewiseResult, Employee, EmployeeId, Interface, NewEmployee};
use async_trait::async_trait;

/// Employee repository trait.
///
/// Every write commits before returning.
#[async_trait]
pub trait EmployeeRepository: Interface + Send + Sync {
    /// Finds an employee by ID.
    async fn find_by_id(&self, id: EmployeeId) -> CachewiseResult<Option<Employee>>;

    /// Returns every employee.
    async fn find_all(&self) -> CachewiseResult<Vec<Employee>>;

    /// Inserts a new employee.
    ///
    /// The store assigns an identity when `employee.id` is `None`.
    async fn insert(&self, employee: &NewEmployee) -> CachewiseResult<Employee>;

    /// Persists the mutable fields of an existing employee.
    async fn update(&self, employee: &Employee) -> CachewiseResult<Employee>;

    /// Removes an employee. Returns `true` if a row was deleted.
    async fn remove(&self, id: EmployeeId) -> CachewiseResult<bool>;
}

/// Read-only bank catalogue.
#[async_trait]
pub trait BankRepository: Interface + Send + Sync {
    /// Returns every bank branch.
    async fn find_all(&self) -> CachewiseResult<Vec<Bank>>;
}
