//! MySQL employee repository implementation.

use crate::{traits::EmployeeRepository, DatabasePoolInterface};
use cachewise_core::{CachewiseError, CachewiseResult, Employee, EmployeeId, NewEmployee, Salary};
use async_trait::async_trait;
use shaku::Component;
use sqlx::{types::BigDecimal, FromRow};
use std::sync::Arc;
use tracing::debug;

/// MySQL employee repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = EmployeeRepository)]
pub struct MySqlEmployeeRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlEmployeeRepository {
    /// Creates a new MySQL employee repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an employee.
#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    position: String,
    salary: BigDecimal,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: EmployeeId::new(row.id),
            name: row.name,
            position: row.position,
            salary: Salary::new(row.salary),
        }
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> CachewiseResult<Option<Employee>> {
        debug!("Finding employee by id: {}", id);

        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, position, salary FROM employees WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Employee::from))
    }

    async fn find_all(&self) -> CachewiseResult<Vec<Employee>> {
        debug!("Finding all employees");

        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, position, salary FROM employees ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn insert(&self, employee: &NewEmployee) -> CachewiseResult<Employee> {
        debug!("Inserting employee: {}", employee.name);

        let result = match employee.id {
            Some(id) => {
                sqlx::query("INSERT INTO employees (id, name, position, salary) VALUES (?, ?, ?, ?)")
                    .bind(id.into_inner())
                    .bind(&employee.name)
                    .bind(&employee.position)
                    .bind(employee.salary.amount())
                    .execute(self.pool.inner())
                    .await?
            }
            None => {
                sqlx::query("INSERT INTO employees (name, position, salary) VALUES (?, ?, ?)")
                    .bind(&employee.name)
                    .bind(&employee.position)
                    .bind(employee.salary.amount())
                    .execute(self.pool.inner())
                    .await?
            }
        };

        // MySQL reports the stored AUTO_INCREMENT value, explicit or generated.
        // An explicit 0 makes the server generate one.
        let id = match (employee.id, result.last_insert_id()) {
            (Some(id), 0) => id,
            (None, 0) => {
                return Err(CachewiseError::internal(
                    "Insert did not report a generated employee id",
                ))
            }
            (_, raw) => EmployeeId::new(i64::try_from(raw).map_err(|_| {
                CachewiseError::internal("Generated employee id out of range")
            })?),
        };

        Ok(employee.with_id(id))
    }

    async fn update(&self, employee: &Employee) -> CachewiseResult<Employee> {
        debug!("Updating employee: {}", employee.id);

        sqlx::query("UPDATE employees SET name = ?, position = ?, salary = ? WHERE id = ?")
            .bind(&employee.name)
            .bind(&employee.position)
            .bind(employee.salary.amount())
            .bind(employee.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        // MySQL doesn't support RETURNING, so update then select
        self.find_by_id(employee.id)
            .await?
            .ok_or_else(|| CachewiseError::internal("Failed to fetch updated employee"))
    }

    async fn remove(&self, id: EmployeeId) -> CachewiseResult<bool> {
        debug!("Deleting employee: {}", id);

        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlEmployeeRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlEmployeeRepository").finish_non_exhaustive()
    }
}
