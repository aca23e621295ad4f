//! Main application router.

use crate::{
    controllers::{bank_controller, employee_controller, health_controller},
    middleware::{logging_middleware, response_cache_middleware},
    openapi::ApiDoc,
    state::AppState,
};
use cachewise_config::{ResponseCacheConfig, ServerConfig};
use cachewise_repository::DatabasePoolInterface;
use cachewise_service::{BankService, CacheInterface, EmployeeService, ResponseCacheStore};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router from a Shaku module.
pub fn create_router_from_module<M>(
    module: &M,
    server_config: &ServerConfig,
    response_cache: &ResponseCacheConfig,
) -> Router
where
    M: Module
        + HasComponent<dyn EmployeeService>
        + HasComponent<dyn BankService>
        + HasComponent<dyn DatabasePoolInterface>
        + HasComponent<dyn CacheInterface>,
{
    create_router(AppState::from_module(module), server_config, response_cache)
}

/// Creates the main application router.
///
/// The response cache gate wraps only the bank routes; the employee API
/// always reaches its handlers.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    response_cache: &ResponseCacheConfig,
) -> Router {
    let mut bank_router = bank_controller::router();
    if response_cache.enabled {
        let store = Arc::new(ResponseCacheStore::new(
            response_cache.ttl(),
            response_cache.max_entries,
        ));
        if store.spawn_purge_task().is_none() {
            warn!("No tokio runtime, expired responses are only dropped when replaced");
        }
        bank_router = bank_router.route_layer(middleware::from_fn_with_state(
            store,
            response_cache_middleware,
        ));
    }

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/api/employee", employee_controller::router())
        .nest("/bank", bank_router)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root));

    if server_config.compression_enabled {
        router = router.layer(CompressionLayer::new());
    }

    let router = router
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "cachewise API"
}
