//! Full data purge for local development.

use serde::Serialize;
use tracing::warn;

use chirpy_core::config::Platform;
use chirpy_core::error::AppError;
use chirpy_database::Repositories;

/// Rows removed by a purge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    /// Accounts removed.
    pub users: u64,
    /// Chirps removed.
    pub chirps: u64,
    /// Refresh tokens removed.
    pub refresh_tokens: u64,
}

/// Development maintenance.
#[derive(Clone)]
pub struct AdminService {
    repositories: Repositories,
    platform: Platform,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(repositories: Repositories, platform: Platform) -> Self {
        Self {
            repositories,
            platform,
        }
    }

    /// Deletes every account along with its chirps and refresh tokens.
    ///
    /// Refused outside the dev platform.
    pub async fn purge(&self) -> Result<PurgeReport, AppError> {
        if self.platform != Platform::Dev {
            warn!(platform = %self.platform, "Purge refused");
            return Err(AppError::authorization(
                "Reset is only allowed in the dev environment",
            ));
        }

        let refresh_tokens = self.repositories.refresh_tokens.delete_all().await?;
        let chirps = self.repositories.chirps.delete_all().await?;
        let users = self.repositories.users.delete_all().await?;

        warn!(users, chirps, refresh_tokens, "All accounts purged");
        Ok(PurgeReport {
            users,
            chirps,
            refresh_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirpy_core::error::ErrorKind;
    use chirpy_entity::user::CreateUser;

    #[tokio::test]
    async fn test_purge_in_dev() {
        let repositories = Repositories::memory();
        repositories
            .users
            .create(&CreateUser {
                email: "a@example.com".into(),
                hashed_password: "hash".into(),
            })
            .await
            .unwrap();

        let service = AdminService::new(repositories.clone(), Platform::Dev);
        let report = service.purge().await.unwrap();
        assert_eq!(report.users, 1);
        assert!(
            repositories
                .users
                .find_by_email("a@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_purge_refused_in_prod() {
        let service = AdminService::new(Repositories::memory(), Platform::Prod);
        let err = service.purge().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
