use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use chirpy_core::error::AppError;
use chirpy_core::result::AppResult;
use chirpy_entity::token::{CreateRefreshToken, RefreshToken};

use crate::repositories::RefreshTokenRepository;

/// Refresh tokens in a sharded concurrent map.
///
/// Each entry is updated under its shard lock, so a revoke and a lookup
/// of the same token never observe a half-written record, and operations
/// on different tokens do not contend beyond shard collisions.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenRepository {
    tokens: DashMap<String, RefreshToken>,
}

impl MemoryRefreshTokenRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn create(&self, data: &CreateRefreshToken) -> AppResult<RefreshToken> {
        match self.tokens.entry(data.token.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Refresh token collision")),
            Entry::Vacant(slot) => {
                let record = RefreshToken {
                    token: data.token.clone(),
                    user_id: data.user_id,
                    created_at: data.created_at,
                    updated_at: data.created_at,
                    expires_at: data.expires_at,
                    revoked_at: None,
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.get(token).map(|r| r.value().clone()))
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> AppResult<bool> {
        Ok(match self.tokens.get_mut(token) {
            Some(mut record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(at);
                record.updated_at = at;
                true
            }
            _ => false,
        })
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let count = self.tokens.len() as u64;
        self.tokens.clear();
        Ok(count)
    }
}
