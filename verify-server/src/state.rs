//! Application state

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::{JwtConfig, JwtService};
use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT token service
    pub jwt: JwtService,
}

impl AppState {
    /// Connect to the database, run migrations, and assemble the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Connected to PostgreSQL");

        Ok(Self::with_pool(pool, config))
    }

    /// Assemble the state around an existing pool (no connect, no migrate)
    pub fn with_pool(pool: PgPool, config: &Config) -> Self {
        let jwt = JwtService::with_config(JwtConfig::new(
            config.jwt_secret.clone(),
            config.jwt_expiration_minutes,
        ));
        Self { pool, jwt }
    }
}
