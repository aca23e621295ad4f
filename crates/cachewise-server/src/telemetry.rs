//! Logging and metrics initialization.

use cachewise_config::ObservabilityConfig;
use cachewise_core::{CachewiseError, CachewiseResult};
use cachewise_service::cache::cache_metrics::register_metrics;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives when neither `RUST_LOG` nor the config sets one.
fn default_directives(level: &str) -> String {
    format!("{},cachewise=debug,tower_http=debug", level)
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `observability.log_level`.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Installs the Prometheus recorder and describes the service metrics.
pub fn init_metrics() -> CachewiseResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        CachewiseError::Configuration(format!("Failed to install Prometheus recorder: {}", e))
    })?;

    register_metrics();
    info!("Prometheus metrics initialized");
    Ok(handle)
}

/// Router exposing the scrape endpoint at `path`.
pub fn metrics_router(path: &str, handle: PrometheusHandle) -> Router {
    Router::new().route(
        path,
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_include_level() {
        assert_eq!(
            default_directives("warn"),
            "warn,cachewise=debug,tower_http=debug"
        );
    }
}
