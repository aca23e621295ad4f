//! # Cachewise Server
//!
//! Serves the employee and bank APIs with a Redis entity cache in front of
//! MySQL and a short-lived response cache on the bank listing.

use cachewise_config::{AppConfig, ConfigLoader};
use cachewise_core::{CachewiseError, CachewiseResult};
use cachewise_rest::create_router_from_module;
use cachewise_server::{
    di::{build_module, ModuleResolver},
    startup::{print_banner, print_startup_info},
    telemetry::{init_logging, init_metrics, metrics_router},
};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();
    info!("Starting cachewise server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn load_config() -> CachewiseResult<AppConfig> {
    let config_loader = ConfigLoader::from_default_location()?;
    Ok(config_loader.get().await)
}

async fn run(config: AppConfig) -> CachewiseResult<()> {
    info!("Environment: {}", config.app.environment);

    let metrics_handle = if config.observability.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let module = build_module(&config.database, &config.redis).await?;
    let db_pool = module.database_pool();

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    if let Err(e) = module.cache().ping().await {
        warn!("Entity cache not reachable at startup, serving from the database: {}", e);
    }

    let mut router =
        create_router_from_module(module.as_ref(), &config.server, &config.response_cache);
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics_router(&config.observability.metrics_path, handle));
    }

    let addr = config.server.addr();
    print_startup_info(&config);
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CachewiseError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CachewiseError::internal(format!("REST server error: {}", e)))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
