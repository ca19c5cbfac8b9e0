use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use chirpy_core::error::AppError;
use chirpy_core::result::AppResult;
use chirpy_core::types::UserId;
use chirpy_entity::user::{CreateUser, UpdateCredentials, User};

use crate::repositories::UserRepository;

/// Accounts held in a map behind a Tokio lock.
///
/// The write lock covers the email uniqueness check and the insert so two
/// concurrent registrations cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == data.email) {
            return Err(AppError::conflict("Email is already registered"));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            hashed_password: data.hashed_password.clone(),
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_credentials(&self, data: &UpdateCredentials) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email == data.email && u.id != data.id)
        {
            return Err(AppError::conflict("Email is already registered"));
        }

        Ok(users.get_mut(&data.id).map(|user| {
            user.email = data.email.clone();
            user.hashed_password = data.hashed_password.clone();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn upgrade_to_red(&self, id: UserId) -> AppResult<bool> {
        let mut users = self.users.write().await;
        Ok(match users.get_mut(&id) {
            Some(user) => {
                user.is_chirpy_red = true;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut users = self.users.write().await;
        let count = users.len() as u64;
        users.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirpy_core::error::ErrorKind;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            hashed_password: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.create(&new_user("a@example.com")).await.unwrap();
        let err = repo.create(&new_user("a@example.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_and_upgrade() {
        let repo = MemoryUserRepository::new();
        let user = repo.create(&new_user("a@example.com")).await.unwrap();

        let updated = repo
            .update_credentials(&UpdateCredentials {
                id: user.id,
                email: "b@example.com".to_string(),
                hashed_password: "hash2".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email, "b@example.com");
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());

        assert!(repo.upgrade_to_red(user.id).await.unwrap());
        assert!(repo.find_by_id(user.id).await.unwrap().unwrap().is_chirpy_red);
        assert!(!repo.upgrade_to_red(UserId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = MemoryUserRepository::new();
        repo.create(&new_user("a@example.com")).await.unwrap();
        repo.create(&new_user("b@example.com")).await.unwrap();
        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
    }
}
