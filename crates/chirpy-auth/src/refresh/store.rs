//! Refresh token lifecycle over a [`RefreshTokenRepository`].

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::Duration;
use tracing::{debug, info};

use chirpy_core::traits::Clock;
use chirpy_core::types::UserId;
use chirpy_database::RefreshTokenRepository;
use chirpy_entity::token::{CreateRefreshToken, RefreshToken, RefreshTokenState};

use crate::error::AuthError;

/// Entropy per token. Hex-encoded to 64 characters.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Issues, looks up and revokes refresh tokens.
///
/// Holds no state of its own. Every call goes to the repository, and expiry
/// is evaluated against the injected clock at read time.
#[derive(Clone)]
pub struct RefreshTokenStore {
    repository: Arc<dyn RefreshTokenRepository>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl std::fmt::Debug for RefreshTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl RefreshTokenStore {
    /// Creates a store whose tokens live for `ttl_days`.
    pub fn new(
        repository: Arc<dyn RefreshTokenRepository>,
        clock: Arc<dyn Clock>,
        ttl_days: u64,
    ) -> Self {
        let ttl = i64::try_from(ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .unwrap_or(Duration::MAX);
        Self {
            repository,
            clock,
            ttl,
        }
    }

    /// Issues and persists a new token for `owner`.
    ///
    /// A collision with an existing token is returned as a store error.
    pub async fn issue(&self, owner: UserId) -> Result<RefreshToken, AuthError> {
        let token = generate_token()?;
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::InvalidTtl)?;

        let record = self
            .repository
            .create(&CreateRefreshToken {
                token,
                user_id: owner,
                created_at: now,
                expires_at,
            })
            .await?;

        debug!(user_id = %owner, expires_at = %record.expires_at, "Refresh token issued");
        Ok(record)
    }

    /// Returns the record only if it is usable for renewal.
    pub async fn lookup(&self, token: &str) -> Result<RefreshToken, AuthError> {
        let record = self
            .repository
            .find(token)
            .await?
            .ok_or(AuthError::NotFound)?;

        match record.state_at(self.clock.now()) {
            RefreshTokenState::Active => Ok(record),
            RefreshTokenState::Revoked => Err(AuthError::Revoked),
            RefreshTokenState::Expired => Err(AuthError::Expired),
        }
    }

    /// Reports where a token stands without treating non-active states as
    /// errors.
    pub async fn state(&self, token: &str) -> Result<RefreshTokenState, AuthError> {
        let record = self
            .repository
            .find(token)
            .await?
            .ok_or(AuthError::NotFound)?;
        Ok(record.state_at(self.clock.now()))
    }

    /// Revokes a token. Unknown and already-revoked tokens succeed silently.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        if self.repository.revoke(token, self.clock.now()).await? {
            info!("Refresh token revoked");
        } else {
            debug!("Revoke was a no-op");
        }
        Ok(())
    }
}

fn generate_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| AuthError::HashingInfraFailure)?;
    Ok(hex::encode(bytes))
}
