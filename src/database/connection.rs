use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DatabaseConnection {
    pool: MySqlPool,
}

impl DatabaseConnection {
    /// Build the pool without opening a connection; the first query connects
    pub fn new_lazy(config: &DatabaseConfig) -> Self {
        let pool = Self::pool_options(config).connect_lazy_with(config.connect_options());
        info!(host = %config.host, database = %config.database, max_connections = config.pool, "Database pool configured");
        Self { pool }
    }

    fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(config.pool)
            .acquire_timeout(ACQUIRE_TIMEOUT)
    }

    pub fn into_pool(self) -> MySqlPool {
        self.pool
    }
}

/// `SELECT 1` round trip
pub async fn health_check(pool: &MySqlPool) -> Result<bool> {
    let health: i64 = sqlx::query_scalar("SELECT 1 as health")
        .fetch_one(pool)
        .await?;
    Ok(health == 1)
}
