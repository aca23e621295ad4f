//! Server startup output.

use cachewise_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
                 _                   _
   ___ __ _  ___| |__   _____      _(_)___  ___
  / __/ _` |/ __| '_ \ / _ \ \ /\ / / / __|/ _ \
 | (_| (_| | (__| | | |  __/\ V  V /| \__ \  __/
  \___\__,_|\___|_| |_|\___| \_/\_/ |_|___/\___|
    "#);
}

/// Prints where the server can be reached and how caching is set up.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();

    info!("{}", separator);
    info!("REST API:  http://{}/api/employee", addr);
    info!("Banks:     http://{}/bank/list", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    if config.redis.enabled {
        info!(
            "Entity cache: {} (ttl {}s, prefix '{}')",
            config.redis.url, config.redis.entity_ttl_secs, config.redis.instance_name
        );
    } else {
        info!("Entity cache: disabled");
    }
    if config.response_cache.enabled {
        info!("Response cache: ttl {}s", config.response_cache.ttl_secs);
    }
    info!("{}", separator);
}
