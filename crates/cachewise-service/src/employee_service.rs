//! Employee service trait definition.

use cachewise_core::{CachewiseResult, Employee, EmployeeId, Interface, NewEmployee};
use async_trait::async_trait;

/// Employee service trait.
///
/// Reads go through the entity cache; writes go to the repository first and
/// then refresh or evict the single-employee entry. The collection entry is
/// left to expire on its own.
#[async_trait]
pub trait EmployeeService: Interface + Send + Sync {
    /// Gets an employee by ID.
    async fn read_one(&self, id: EmployeeId) -> CachewiseResult<Employee>;

    /// Lists every employee. An empty table is reported as not found.
    async fn read_all(&self) -> CachewiseResult<Vec<Employee>>;

    /// Inserts the employee, or updates it when the ID already exists.
    async fn upsert(&self, employee: NewEmployee) -> CachewiseResult<Employee>;

    /// Deletes an employee.
    async fn delete(&self, id: EmployeeId) -> CachewiseResult<()>;
}
