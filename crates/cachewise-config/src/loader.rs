//! Configuration loader with layered sources.

use crate::AppConfig;
use cachewise_core::CachewiseError;
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Environment variable prefix for overrides, e.g. `CACHEWISE__REDIS__URL`.
pub const ENV_PREFIX: &str = "CACHEWISE";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `CACHEWISE__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, CachewiseError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CachewiseError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), CachewiseError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &Path) -> Result<AppConfig, CachewiseError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("CACHEWISE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(config_error_to_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), CachewiseError> {
        if config.database.url.is_empty() {
            return Err(CachewiseError::Configuration("Database URL is required".to_string()));
        }

        if config.redis.enabled && config.redis.url.is_empty() {
            return Err(CachewiseError::Configuration(
                "Redis URL is required when the entity cache is enabled".to_string(),
            ));
        }

        if config.redis.entity_ttl_secs == 0 {
            return Err(CachewiseError::Configuration(
                "redis.entity_ttl_secs must be greater than zero".to_string(),
            ));
        }

        if config.redis.operation_timeout_ms == 0 {
            return Err(CachewiseError::Configuration(
                "redis.operation_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if config.response_cache.enabled && config.response_cache.ttl_secs == 0 {
            return Err(CachewiseError::Configuration(
                "response_cache.ttl_secs must be greater than zero".to_string(),
            ));
        }

        if !config.redis.enabled {
            warn!("Entity cache disabled; every read goes to the database");
        }

        Ok(())
    }
}

fn config_error_to_error(err: ConfigError) -> CachewiseError {
    CachewiseError::Configuration(err.to_string())
}
