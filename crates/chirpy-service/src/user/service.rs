//! Account self-service operations.

use std::sync::Arc;

use tracing::info;

use chirpy_auth::PasswordHasher;
use chirpy_core::error::AppError;
use chirpy_database::UserRepository;
use chirpy_entity::user::{CreateUser, UpdateCredentials, User};

use crate::context::RequestContext;
use crate::password::hash_password;

/// Registers accounts and updates their credentials.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Creates an account. The password is hashed before it reaches storage.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        require_password(password)?;
        let hashed_password = hash_password(&self.hasher, password.to_string()).await?;

        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                hashed_password,
            })
            .await?;

        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    /// Replaces the caller's email and password.
    pub async fn update_credentials(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        require_password(password)?;
        let hashed_password = hash_password(&self.hasher, password.to_string()).await?;

        let user = self
            .users
            .update_credentials(&UpdateCredentials {
                id: ctx.user_id,
                email: email.to_string(),
                hashed_password,
            })
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user.id, "Account credentials updated");
        Ok(user)
    }
}

fn require_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirpy_core::config::HashingConfig;
    use chirpy_core::error::ErrorKind;
    use chirpy_core::types::UserId;
    use chirpy_database::memory::MemoryUserRepository;
    use chrono::Utc;

    fn service() -> (UserService, Arc<PasswordHasher>) {
        let hasher = Arc::new(
            PasswordHasher::new(&HashingConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );
        (
            UserService::new(Arc::new(MemoryUserRepository::new()), hasher.clone()),
            hasher,
        )
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (service, hasher) = service();
        let user = service.register("saul@bettercall.com", "123456").await.unwrap();

        assert_ne!(user.hashed_password, "123456");
        assert!(hasher.verify("123456", &user.hashed_password).is_ok());
        assert!(!user.is_chirpy_red);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _) = service();
        service.register("saul@bettercall.com", "123456").await.unwrap();
        let err = service
            .register("saul@bettercall.com", "654321")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let (service, _) = service();
        let err = service.register("saul@bettercall.com", "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_credentials() {
        let (service, hasher) = service();
        let user = service.register("saul@bettercall.com", "123456").await.unwrap();
        let ctx = RequestContext::new(user.id, Utc::now());

        let updated = service
            .update_credentials(&ctx, "jimmy@mcgill.com", "abcdef")
            .await
            .unwrap();
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.email, "jimmy@mcgill.com");
        assert!(hasher.verify("abcdef", &updated.hashed_password).is_ok());

        let ghost = RequestContext::new(UserId::new(), Utc::now());
        let err = service
            .update_credentials(&ghost, "ghost@example.com", "x")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
