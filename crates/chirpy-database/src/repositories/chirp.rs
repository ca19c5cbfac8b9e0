//! Chirp repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use chirpy_core::error::{AppError, ErrorKind};
use chirpy_core::result::AppResult;
use chirpy_core::types::{ChirpId, SortDirection, UserId};
use chirpy_entity::chirp::{Chirp, CreateChirp};

use super::ChirpRepository;

/// PostgreSQL chirp repository.
#[derive(Debug, Clone)]
pub struct PgChirpRepository {
    pool: PgPool,
}

impl PgChirpRepository {
    /// Create a new chirp repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChirpRepository for PgChirpRepository {
    async fn create(&self, data: &CreateChirp) -> AppResult<Chirp> {
        sqlx::query_as::<_, Chirp>(
            "INSERT INTO chirps (id, body, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING *",
        )
        .bind(ChirpId::new())
        .bind(&data.body)
        .bind(data.user_id)
        .bind(data.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create chirp", e))
    }

    async fn find_by_id(&self, id: ChirpId) -> AppResult<Option<Chirp>> {
        sqlx::query_as::<_, Chirp>("SELECT * FROM chirps WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chirp", e))
    }

    async fn list(&self, author: Option<UserId>, sort: SortDirection) -> AppResult<Vec<Chirp>> {
        let sql = match author {
            Some(_) => format!(
                "SELECT * FROM chirps WHERE user_id = $1 ORDER BY created_at {}",
                sort.as_sql()
            ),
            None => format!("SELECT * FROM chirps ORDER BY created_at {}", sort.as_sql()),
        };

        let mut query = sqlx::query_as::<_, Chirp>(&sql);
        if let Some(author) = author {
            query = query.bind(author);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list chirps", e))
    }

    async fn delete(&self, id: ChirpId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete chirp", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM chirps")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete chirps", e))?;
        Ok(result.rows_affected())
    }
}
