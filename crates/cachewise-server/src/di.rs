//! Dependency injection module using Shaku.
//!
//! `CachewiseModule` wires the MySQL pool and employee repository, the
//! seeded bank repository, the Redis entity cache and both services.

use cachewise_config::{DatabaseConfig, RedisConfig};
use cachewise_core::{module, CachewiseError, CachewiseResult, HasComponent};
use cachewise_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, EmployeeRepository,
    MySqlEmployeeRepository, StaticBankRepository,
};
use cachewise_service::{
    BankService, BankServiceComponent, CacheInterface, EmployeeServiceComponent,
    EmployeeServiceComponentParameters, EmployeeService, RedisCacheService,
    RedisCacheServiceParameters,
};
use std::sync::Arc;
use tracing::info;

module! {
    pub CachewiseModule {
        components = [
            DatabasePool,
            MySqlEmployeeRepository,
            StaticBankRepository,
            RedisCacheService,
            EmployeeServiceComponent,
            BankServiceComponent,
        ],
        providers = [],
    }
}

/// Creates the Redis pool, or `None` when the entity cache is disabled.
///
/// Pool creation does not connect; an unreachable server shows up later as
/// cache misses.
pub fn create_cache_pool(
    redis_config: &RedisConfig,
) -> CachewiseResult<Option<Arc<deadpool_redis::Pool>>> {
    if !redis_config.enabled {
        info!("Entity cache disabled");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&redis_config.url);
    redis_cfg.pool = Some(deadpool_redis::PoolConfig::new(redis_config.pool_size.max(1)));
    let pool = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| CachewiseError::cache(format!("Failed to create Redis pool: {}", e)))?;

    Ok(Some(Arc::new(pool)))
}

/// Builds the application module.
///
/// Connects to MySQL eagerly so a bad database URL fails startup.
pub async fn build_module(
    db_config: &DatabaseConfig,
    redis_config: &RedisConfig,
) -> CachewiseResult<Arc<CachewiseModule>> {
    let db_pool = DatabasePool::connect(db_config).await?;
    let cache_pool = create_cache_pool(redis_config)?;

    let module = CachewiseModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
            instance_name: redis_config.instance_name.clone(),
            operation_timeout: redis_config.operation_timeout(),
        })
        .with_component_parameters::<EmployeeServiceComponent>(
            EmployeeServiceComponentParameters {
                entity_ttl: redis_config.entity_ttl(),
            },
        )
        .build();

    Ok(Arc::new(module))
}

/// Resolves the pieces `main` needs directly.
pub trait ModuleResolver {
    /// Resolves the employee service.
    fn employee_service(&self) -> Arc<dyn EmployeeService>;

    /// Resolves the bank service.
    fn bank_service(&self) -> Arc<dyn BankService>;

    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the entity cache.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl ModuleResolver for CachewiseModule {
    fn employee_service(&self) -> Arc<dyn EmployeeService> {
        self.resolve()
    }

    fn bank_service(&self) -> Arc<dyn BankService> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}
