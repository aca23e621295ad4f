//! Health check controller.

use crate::state::AppState;
use cachewise_core::HealthStatus;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Status of one dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readiness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready`, `degraded` or `unavailable`.
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint.
///
/// An unhealthy database makes the service unavailable. A failing cache only
/// degrades it, since reads fall back to the database.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let results = join_all(state.health_checks.iter().map(|check| async move {
        (check.name().to_string(), check.check().await)
    }))
    .await;

    let unavailable = results.iter().any(|(_, status)| status.is_unhealthy());
    let degraded = results.iter().any(|(_, status)| !status.is_healthy());

    let checks = results
        .into_iter()
        .map(|(name, status)| {
            let (status, message) = match status {
                HealthStatus::Healthy => ("healthy", None),
                HealthStatus::Degraded(msg) => ("degraded", Some(msg)),
                HealthStatus::Unhealthy(msg) => ("unhealthy", Some(msg)),
            };
            ComponentHealth {
                name,
                status: status.to_string(),
                message,
            }
        })
        .collect();

    let (code, status) = if unavailable {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    } else if degraded {
        (StatusCode::OK, "degraded")
    } else {
        (StatusCode::OK, "ready")
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.to_string(),
            checks,
        }),
    )
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
