use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::core::error::ConfigError;

/// Owns the connection pool for the lifetime of the server.
#[derive(Clone, Debug)]
pub(crate) struct Database {
    pool: PgPool,
}

impl Database {
    pub(crate) async fn connect(
        database_url: &str,
        max_connections: u32,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(timeout)
            .connect(database_url)
            .await
            .map_err(ConfigError::DatabaseConnection)?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(ConfigError::DatabaseConnection)?;

        tracing::info!("Connected to database");

        Ok(Self { pool })
    }

    pub(crate) async fn migrate(&self) -> Result<(), ConfigError> {
        sqlx::migrate!().run(&self.pool).await?;

        Ok(())
    }

    pub(crate) fn handle(&self) -> PgPool {
        self.pool.clone()
    }

    pub(crate) async fn close(&self) {
        self.pool.close().await;

        tracing::info!("Database connection closed");
    }
}
