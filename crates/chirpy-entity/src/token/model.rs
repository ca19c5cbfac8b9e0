//! Refresh token record and lifecycle state.

use chirpy_core::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// 64 lowercase hex characters. Primary key.
    pub token: String,
    /// Account the token renews sessions for.
    pub user_id: UserId,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
    /// When the row was last changed.
    pub updated_at: DateTime<Utc>,
    /// Hard expiry.
    pub expires_at: DateTime<Utc>,
    /// Set once on explicit revoke.
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Where a refresh token stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTokenState {
    /// Usable for renewal.
    Active,
    /// Explicitly revoked. Terminal.
    Revoked,
    /// Past `expires_at`. Terminal.
    Expired,
}

impl RefreshToken {
    /// Evaluates the lifecycle state at `now`. Revocation wins over expiry.
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.revoked_at.is_some() {
            RefreshTokenState::Revoked
        } else if now >= self.expires_at {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }
}

/// Data required to persist a new refresh token.
#[derive(Debug, Clone)]
pub struct CreateRefreshToken {
    /// The opaque token string.
    pub token: String,
    /// Owning account.
    pub user_id: UserId,
    /// Issue time.
    pub created_at: DateTime<Utc>,
    /// Hard expiry.
    pub expires_at: DateTime<Utc>,
}
