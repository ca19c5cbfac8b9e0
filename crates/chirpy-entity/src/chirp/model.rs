//! Chirp entity model.

use chirpy_core::types::{ChirpId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A short text post owned by one account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chirp {
    /// Unique chirp identifier.
    pub id: ChirpId,
    /// Post body, already cleaned.
    pub body: String,
    /// Owning account. Always taken from storage, never from the request.
    pub user_id: UserId,
    /// When the chirp was created.
    pub created_at: DateTime<Utc>,
    /// When the chirp was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a chirp.
#[derive(Debug, Clone)]
pub struct CreateChirp {
    /// Cleaned post body.
    pub body: String,
    /// Owning account.
    pub user_id: UserId,
    /// Creation time, taken from the request's clock.
    pub created_at: DateTime<Utc>,
}
