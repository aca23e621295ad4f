//! Employee controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use cachewise_core::{CachewiseError, Employee, EmployeeId, ErrorResponse};
use cachewise_service::UpsertEmployeeRequest;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use tracing::debug;

/// Body returned by a successful delete.
pub const EMPLOYEE_DELETED: &str = "Employee Deleted";

/// Creates the employee router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert_employee))
        .route("/all", get(list_employees))
        .route("/:id", get(get_employee).delete(delete_employee))
}

/// List every employee.
#[utoipa::path(
    get,
    path = "/api/employee/all",
    tag = "employees",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 404, description = "No employees stored", body = ErrorResponse)
    )
)]
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    debug!("List employees request");

    let employees = state.employee_service.read_all().await?;
    ok(employees)
}

/// Get an employee by ID.
#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    tag = "employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Employee> {
    debug!("Get employee request: {}", id);

    let employee_id = parse_employee_id(&id)?;
    let employee = state.employee_service.read_one(employee_id).await?;
    ok(employee)
}

/// Create or update an employee.
#[utoipa::path(
    post,
    path = "/api/employee",
    tag = "employees",
    request_body = UpsertEmployeeRequest,
    responses(
        (status = 200, description = "Stored employee", body = Employee),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn upsert_employee(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpsertEmployeeRequest>,
) -> ApiResult<Employee> {
    debug!("Upsert employee request: {}", request.name);

    let employee = state.employee_service.upsert(request.into()).await?;
    ok(employee)
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    tag = "employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = String),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str, AppError> {
    debug!("Delete employee request: {}", id);

    let employee_id = parse_employee_id(&id)?;
    state.employee_service.delete(employee_id).await?;
    Ok(EMPLOYEE_DELETED)
}

/// Helper to parse an employee ID from a path parameter.
fn parse_employee_id(id: &str) -> Result<EmployeeId, AppError> {
    id.parse()
        .map_err(|_| AppError(CachewiseError::Validation(format!("Invalid employee ID: {}", id))))
}
