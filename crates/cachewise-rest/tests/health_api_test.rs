//! Router-level tests for the health endpoints.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use cachewise_core::{HealthCheck, HealthStatus};
use cachewise_rest::{create_router, AppState};
use cachewise_config::{ResponseCacheConfig, ServerConfig};
use cachewise_repository::StaticBankRepository;
use cachewise_service::{
    BankServiceComponent, CacheHealth, EmployeeServiceComponent, InMemoryCache,
    DEFAULT_ENTITY_TTL,
};
use common::{MemoryEmployeeRepository, TestApp};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct FixedHealth(HealthStatus);

#[async_trait]
impl HealthCheck for FixedHealth {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        self.0.clone()
    }
}

async fn readiness(database: HealthStatus, cache_failing: bool) -> (StatusCode, serde_json::Value) {
    let cache = Arc::new(InMemoryCache::new());
    cache.set_failing(cache_failing);

    let employee_service = EmployeeServiceComponent::new(
        Arc::new(MemoryEmployeeRepository::default()),
        cache.clone(),
        DEFAULT_ENTITY_TTL,
    );
    let bank_service = BankServiceComponent::new(Arc::new(StaticBankRepository::default()));
    let state = AppState::new(Arc::new(employee_service), Arc::new(bank_service))
        .with_health_check(Arc::new(FixedHealth(database)))
        .with_health_check(Arc::new(CacheHealth(cache)));

    let router = create_router(state, &ServerConfig::default(), &ResponseCacheConfig::default());
    let response = router
        .oneshot(
            axum::http::Request::get("/ready")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_and_live() {
    let app = TestApp::new(vec![]);

    assert_eq!(app.get("/health").await.0, StatusCode::OK);
    assert_eq!(app.get("/live").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_ready_when_all_healthy() {
    let (status, body) = readiness(HealthStatus::Healthy, false).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cache_outage_only_degrades() {
    let (status, body) = readiness(HealthStatus::Healthy, true).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_database_outage_is_unavailable() {
    let (status, body) =
        readiness(HealthStatus::Unhealthy("connection refused".to_string()), false).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["checks"][0]["message"], "connection refused");
}
