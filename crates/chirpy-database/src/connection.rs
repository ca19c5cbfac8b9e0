//! PostgreSQL pool built from `[database]` settings.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use chirpy_core::config::DatabaseConfig;
use chirpy_core::error::{AppError, ErrorKind};

/// Shared handle to the connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens the pool. A missing or unparseable URL is a configuration error.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = connect_options(config)?;

        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database unreachable", e))?;

        Ok(Self { pool })
    }

    /// The underlying sqlx pool, for building repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for in-flight queries and closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Parses the URL without logging it; credentials stay out of the logs.
fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, AppError> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| AppError::configuration("database.url is not set"))?;

    PgConnectOptions::from_str(url).map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, "database.url is not a valid PostgreSQL URL", e)
    })
}
