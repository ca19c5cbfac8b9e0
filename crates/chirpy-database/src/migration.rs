//! Embedded schema migrations from `/migrations`.

use sqlx::migrate::Migrator;
use tracing::info;

use chirpy_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

/// Every migration shipped with this build.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

impl DatabasePool {
    /// Applies pending migrations. Already-applied ones are skipped.
    pub async fn migrate(&self) -> Result<(), AppError> {
        MIGRATOR.run(self.pool()).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Schema migration failed", e)
        })?;

        info!(available = MIGRATOR.iter().count(), "Schema is up to date");
        Ok(())
    }
}
