//! Shared application state
//! 
//! Passed to every axum handler. Repositories are trait objects so the same
//! router runs on PostgreSQL or on the in-memory store.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    ActivityLogRepository, JobRepository, MemoryStore, PgActivityLogRepository, PgJobRepository,
    PgUserRepository, PgVehicleRepository, UserRepository, VehicleRepository,
};
use crate::services::change_feed::ChangeFeed;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub logs: Arc<dyn ActivityLogRepository>,
    pub feed: ChangeFeed,
}

impl AppState {
    pub fn with_postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config,
            users: Arc::new(PgUserRepository::new(pool.clone())),
            jobs: Arc::new(PgJobRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            logs: Arc::new(PgActivityLogRepository::new(pool)),
            feed: ChangeFeed::default(),
        }
    }

    pub fn with_memory_store(config: EnvironmentConfig) -> Self {
        let store = MemoryStore::new();
        Self {
            config,
            users: Arc::new(store.clone()),
            jobs: Arc::new(store.clone()),
            vehicles: Arc::new(store.clone()),
            logs: Arc::new(store),
            feed: ChangeFeed::default(),
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::from(&self.config)
    }
}
