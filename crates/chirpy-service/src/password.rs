//! Runs password hashing on the blocking pool.

use std::sync::Arc;

use chirpy_auth::{AuthError, PasswordHasher};
use chirpy_core::error::{AppError, ErrorKind};

/// Hashes `password` off the async executor.
pub async fn hash_password(hasher: &Arc<PasswordHasher>, password: String) -> Result<String, AppError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Password hashing task failed", e))?
        .map_err(AppError::from)
}

/// Verifies `password` against `hash` off the async executor.
///
/// The inner result keeps the [`AuthError`] so callers can tell a wrong
/// password from a corrupt hash.
pub async fn verify_password(
    hasher: &Arc<PasswordHasher>,
    password: String,
    hash: String,
) -> Result<Result<(), AuthError>, AppError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Password verification task failed", e))
}
