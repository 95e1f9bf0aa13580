use yoga_db::{MemoryStore, Store, StoreError, init_db_pool};

use crate::config::{CorsConfig, JwtConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Store, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

/// Builds the state from the environment, backed by PostgreSQL.
pub async fn init_app_state(database_url: &str) -> Result<AppState, StoreError> {
    let pool = init_db_pool(database_url).await?;

    Ok(AppState::new(
        Store::postgres(pool),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}

/// Builds the state from the environment, backed by a seeded in-memory store.
pub fn init_in_memory_state() -> Result<AppState, StoreError> {
    Ok(AppState::new(
        Store::in_memory(MemoryStore::seeded()?),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
