//! OpenAPI documentation configuration.

use crate::controllers::{ComponentHealth, HealthResponse, ReadinessResponse};
use cachewise_core::{Bank, BankId, Employee, EmployeeId, ErrorResponse, FieldError};
use cachewise_service::{BankListing, UpsertEmployeeRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the cachewise API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cachewise API",
        version = "1.0.0",
        description = "Employee and bank lookups behind a Redis cache-aside layer"
    ),
    paths(
        crate::controllers::employee_controller::list_employees,
        crate::controllers::employee_controller::get_employee,
        crate::controllers::employee_controller::upsert_employee,
        crate::controllers::employee_controller::delete_employee,
        crate::controllers::bank_controller::list_banks,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            EmployeeId,
            Employee,
            BankId,
            Bank,
            BankListing,
            UpsertEmployeeRequest,
            ErrorResponse,
            FieldError,
            HealthResponse,
            ComponentHealth,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "employees", description = "Employee management"),
        (name = "banks", description = "Bank catalogue"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/employee/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/employee/all"));
        assert!(paths.iter().any(|p| p.as_str() == "/bank/list"));
    }
}
