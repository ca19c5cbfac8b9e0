//! Repository contracts and their PostgreSQL implementations.
//!
//! Services only see the traits; [`Repositories`] bundles one trait object
//! per entity so the backing store is chosen once at start-up.

pub mod chirp;
pub mod refresh_token;
pub mod user;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use chirpy_core::result::AppResult;
use chirpy_core::types::{ChirpId, SortDirection, UserId};
use chirpy_entity::chirp::{Chirp, CreateChirp};
use chirpy_entity::token::{CreateRefreshToken, RefreshToken};
use chirpy_entity::user::{CreateUser, UpdateCredentials, User};

use crate::memory::{MemoryChirpRepository, MemoryRefreshTokenRepository, MemoryUserRepository};

pub use chirp::PgChirpRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;

/// Account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new account. A duplicate email is a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find an account by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find an account by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Replace email and password hash. Returns `None` if the account is gone.
    async fn update_credentials(&self, data: &UpdateCredentials) -> AppResult<Option<User>>;

    /// Grant the paid membership. Returns `false` if no such account exists.
    async fn upgrade_to_red(&self, id: UserId) -> AppResult<bool>;

    /// Remove every account. Returns the number removed.
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Chirp persistence.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Insert a new chirp.
    async fn create(&self, data: &CreateChirp) -> AppResult<Chirp>;

    /// Find a chirp by primary key.
    async fn find_by_id(&self, id: ChirpId) -> AppResult<Option<Chirp>>;

    /// List chirps by creation time, optionally for one author.
    async fn list(&self, author: Option<UserId>, sort: SortDirection) -> AppResult<Vec<Chirp>>;

    /// Delete a chirp. Returns `true` if a row was removed.
    async fn delete(&self, id: ChirpId) -> AppResult<bool>;

    /// Remove every chirp. Returns the number removed.
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Refresh token persistence.
///
/// `revoke` must be a single conditional write so a concurrent `find`
/// sees either the old or the new `revoked_at`, never a partial update.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new token. A duplicate token string is a conflict.
    async fn create(&self, data: &CreateRefreshToken) -> AppResult<RefreshToken>;

    /// Find a token regardless of state.
    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Set `revoked_at` if it is unset. Returns `true` if this call revoked it.
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> AppResult<bool>;

    /// Remove every token. Returns the number removed.
    async fn delete_all(&self) -> AppResult<u64>;
}

/// One handle per repository, shared across services.
#[derive(Clone)]
pub struct Repositories {
    /// Accounts.
    pub users: Arc<dyn UserRepository>,
    /// Chirps.
    pub chirps: Arc<dyn ChirpRepository>,
    /// Refresh tokens.
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            chirps: Arc::new(PgChirpRepository::new(pool.clone())),
            refresh_tokens: Arc::new(PgRefreshTokenRepository::new(pool)),
        }
    }

    /// Process-local repositories. Data is lost on exit.
    pub fn memory() -> Self {
        let users = Arc::new(MemoryUserRepository::new());
        Self {
            chirps: Arc::new(MemoryChirpRepository::new()),
            refresh_tokens: Arc::new(MemoryRefreshTokenRepository::new()),
            users,
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
