//! Account entity model.

use chirpy_core::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account holder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique account identifier.
    pub id: UserId,
    /// Unique login email.
    pub email: String,
    /// Argon2id PHC string. Never the plaintext.
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Whether the account holds the paid membership.
    pub is_chirpy_red: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub hashed_password: String,
}

/// Replacement credentials for an existing account.
#[derive(Debug, Clone)]
pub struct UpdateCredentials {
    /// The account to update.
    pub id: UserId,
    /// New login email.
    pub email: String,
    /// New pre-hashed password.
    pub hashed_password: String,
}
