//! Shared server state

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state — shared by every handler.
///
/// Cheap to clone: the pool is an `Arc` internally.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    /// Build state around an existing pool (used by tests).
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Open the database and build the server state.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db.pool))
    }
}
