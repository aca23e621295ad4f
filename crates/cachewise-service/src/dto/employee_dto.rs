//! Employee-related DTOs.

use cachewise_core::{rules, EmployeeId, NewEmployee, Salary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create or update an employee.
///
/// When `id` is omitted or 0 the repository assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertEmployeeRequest {
    #[serde(default)]
    #[validate(range(min = 0, message = "Id cannot be negative"))]
    pub id: Option<i64>,

    #[validate(
        custom(function = "rules::not_blank", message = "Name is required"),
        length(max = 255, message = "Name cannot exceed 255 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "rules::not_blank", message = "Position is required"),
        length(max = 255, message = "Position cannot exceed 255 characters")
    )]
    pub position: String,

    /// Accepts a JSON number or a decimal string.
    #[validate(custom(function = "rules::salary"))]
    #[schema(value_type = String, example = "1200.50")]
    pub salary: Salary,
}

impl From<UpsertEmployeeRequest> for NewEmployee {
    fn from(request: UpsertEmployeeRequest) -> Self {
        Self {
            id: request.id.filter(|id| *id > 0).map(EmployeeId::new),
            name: request.name,
            position: request.position,
            salary: request.salary,
        }
    }
}
