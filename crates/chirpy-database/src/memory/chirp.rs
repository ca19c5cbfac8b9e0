use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chirpy_core::result::AppResult;
use chirpy_core::types::{ChirpId, SortDirection, UserId};
use chirpy_entity::chirp::{Chirp, CreateChirp};

use crate::repositories::ChirpRepository;

/// Chirps held in a map behind a Tokio lock.
#[derive(Debug, Default)]
pub struct MemoryChirpRepository {
    chirps: RwLock<HashMap<ChirpId, Chirp>>,
}

impl MemoryChirpRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChirpRepository for MemoryChirpRepository {
    async fn create(&self, data: &CreateChirp) -> AppResult<Chirp> {
        let chirp = Chirp {
            id: ChirpId::new(),
            body: data.body.clone(),
            user_id: data.user_id,
            created_at: data.created_at,
            updated_at: data.created_at,
        };
        self.chirps.write().await.insert(chirp.id, chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: ChirpId) -> AppResult<Option<Chirp>> {
        Ok(self.chirps.read().await.get(&id).cloned())
    }

    async fn list(&self, author: Option<UserId>, sort: SortDirection) -> AppResult<Vec<Chirp>> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .read()
            .await
            .values()
            .filter(|c| author.is_none_or(|a| c.user_id == a))
            .cloned()
            .collect();

        chirps.sort_by_key(|c| c.created_at);
        if sort == SortDirection::Desc {
            chirps.reverse();
        }
        Ok(chirps)
    }

    async fn delete(&self, id: ChirpId) -> AppResult<bool> {
        Ok(self.chirps.write().await.remove(&id).is_some())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut chirps = self.chirps.write().await;
        let count = chirps.len() as u64;
        chirps.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn new_chirp(body: &str, user_id: UserId, created_at: DateTime<Utc>) -> CreateChirp {
        CreateChirp {
            body: body.into(),
            user_id,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_author_and_sorts() {
        let repo = MemoryChirpRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let start = Utc::now();

        // Inserted out of order; listing follows created_at.
        let third = repo
            .create(&new_chirp("three", alice, start + Duration::seconds(2)))
            .await
            .unwrap();
        let first = repo
            .create(&new_chirp("one", alice, start))
            .await
            .unwrap();
        repo.create(&new_chirp("two", bob, start + Duration::seconds(1)))
            .await
            .unwrap();

        let asc = repo.list(Some(alice), SortDirection::Asc).await.unwrap();
        assert_eq!(asc.len(), 2);
        assert_eq!(asc[0].id, first.id);
        assert_eq!(asc[0].created_at, first.created_at);

        let desc = repo.list(None, SortDirection::Desc).await.unwrap();
        assert_eq!(desc.len(), 3);
        assert_eq!(desc[0].id, third.id);
    }

    #[tokio::test]
    async fn test_delete_reports_missing() {
        let repo = MemoryChirpRepository::new();
        let chirp = repo
            .create(&new_chirp("x", UserId::new(), Utc::now()))
            .await
            .unwrap();
        assert!(repo.delete(chirp.id).await.unwrap());
        assert!(!repo.delete(chirp.id).await.unwrap());
    }
}
