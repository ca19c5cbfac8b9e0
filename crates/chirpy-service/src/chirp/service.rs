//! Chirp use cases.

use std::sync::Arc;

use tracing::info;

use chirpy_auth::OwnershipGuard;
use chirpy_core::error::AppError;
use chirpy_core::types::{ChirpId, SortDirection, UserId};
use chirpy_database::ChirpRepository;
use chirpy_entity::chirp::{Chirp, CreateChirp};

use super::filter::clean_body;
use crate::context::RequestContext;

/// Creates, reads and deletes chirps.
#[derive(Clone)]
pub struct ChirpService {
    chirps: Arc<dyn ChirpRepository>,
}

impl ChirpService {
    /// Creates a new chirp service.
    pub fn new(chirps: Arc<dyn ChirpRepository>) -> Self {
        Self { chirps }
    }

    /// Posts a chirp owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, body: &str) -> Result<Chirp, AppError> {
        let body = clean_body(body)?;
        let chirp = self
            .chirps
            .create(&CreateChirp {
                body,
                user_id: ctx.user_id,
                created_at: ctx.request_time,
            })
            .await?;

        info!(user_id = %ctx.user_id, chirp_id = %chirp.id, "Chirp created");
        Ok(chirp)
    }

    /// Fetches one chirp.
    pub async fn get(&self, id: ChirpId) -> Result<Chirp, AppError> {
        self.chirps
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Chirp not found"))
    }

    /// Lists chirps by creation time.
    pub async fn list(
        &self,
        author: Option<UserId>,
        sort: SortDirection,
    ) -> Result<Vec<Chirp>, AppError> {
        self.chirps.list(author, sort).await
    }

    /// Deletes a chirp if the caller owns it.
    ///
    /// The owner is read from storage. Missing chirps are `NotFound`,
    /// chirps owned by someone else are `Authorization` failures.
    pub async fn delete(&self, ctx: &RequestContext, id: ChirpId) -> Result<(), AppError> {
        let chirp = self.get(id).await?;
        OwnershipGuard::authorize_resource(ctx.user_id, &chirp)?;

        if !self.chirps.delete(id).await? {
            return Err(AppError::not_found("Chirp not found"));
        }

        info!(user_id = %ctx.user_id, chirp_id = %id, "Chirp deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirpy_core::error::ErrorKind;
    use chirpy_database::memory::MemoryChirpRepository;
    use chrono::Utc;

    fn ctx(user_id: UserId) -> RequestContext {
        RequestContext::new(user_id, Utc::now())
    }

    #[tokio::test]
    async fn test_create_cleans_and_sets_owner() {
        let service = ChirpService::new(Arc::new(MemoryChirpRepository::new()));
        let owner = UserId::new();
        let request = RequestContext::new(owner, Utc::now() - chrono::Duration::days(3));
        let chirp = service.create(&request, " what a kerfuffle ").await.unwrap();
        assert_eq!(chirp.body, "what a ****");
        assert_eq!(chirp.user_id, owner);
        assert_eq!(chirp.created_at, request.request_time);
        assert_eq!(service.get(chirp.id).await.unwrap().id, chirp.id);
    }

    #[tokio::test]
    async fn test_delete_requires_ownership() {
        let service = ChirpService::new(Arc::new(MemoryChirpRepository::new()));
        let owner = UserId::new();
        let chirp = service.create(&ctx(owner), "mine").await.unwrap();

        let err = service.delete(&ctx(UserId::new()), chirp.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(service.get(chirp.id).await.is_ok());

        service.delete(&ctx(owner), chirp.id).await.unwrap();
        let err = service.get(chirp.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = service.delete(&ctx(owner), chirp.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_too_long_rejected() {
        let service = ChirpService::new(Arc::new(MemoryChirpRepository::new()));
        let err = service
            .create(&ctx(UserId::new()), &"x".repeat(141))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
