//! Session lifecycle: login, refresh, revoke.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use chirpy_auth::{AuthError, JwtEncoder, PasswordHasher, RefreshTokenStore};
use chirpy_core::config::AuthConfig;
use chirpy_core::error::AppError;
use chirpy_database::UserRepository;
use chirpy_entity::user::User;

use crate::password::verify_password;

/// Message for every failed login, so responses do not reveal which
/// emails are registered.
const LOGIN_FAILED: &str = "Incorrect email or password";

/// Everything a successful login hands back.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated account.
    pub user: User,
    /// Signed access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
}

/// Issues and renews session credentials.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    refresh_tokens: Arc<RefreshTokenStore>,
    default_ttl: Duration,
    max_ttl: Duration,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        refresh_tokens: Arc<RefreshTokenStore>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            refresh_tokens,
            default_ttl: Duration::from_secs(config.access_token_ttl_seconds),
            max_ttl: Duration::from_secs(config.max_access_token_ttl_seconds),
        }
    }

    /// Lifetime for a client-requested access token. Missing or zero
    /// requests get the default, longer ones are capped.
    pub fn access_ttl(&self, requested_seconds: Option<u64>) -> Duration {
        match requested_seconds {
            Some(0) | None => self.default_ttl,
            Some(secs) => Duration::from_secs(secs).min(self.max_ttl),
        }
    }

    /// Verifies email and password, then issues an access token and a
    /// refresh token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        expires_in_seconds: Option<u64>,
    ) -> Result<LoginResult, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login rejected: unknown email");
            return Err(AppError::authentication(LOGIN_FAILED));
        };

        match verify_password(&self.hasher, password.to_string(), user.hashed_password.clone())
            .await?
        {
            Ok(()) => {}
            Err(AuthError::PasswordMismatch) => {
                warn!(user_id = %user.id, "Login rejected: wrong password");
                return Err(AppError::authentication(LOGIN_FAILED));
            }
            Err(e) => {
                // Corrupt credential row; the caller still sees the uniform failure.
                error!(user_id = %user.id, error = %e, "Login rejected: unusable stored hash");
                return Err(AppError::authentication(LOGIN_FAILED));
            }
        }

        let access_token = self
            .encoder
            .issue(user.id, self.access_ttl(expires_in_seconds))?;
        let refresh = self.refresh_tokens.issue(user.id).await?;

        info!(user_id = %user.id, "Login succeeded");
        Ok(LoginResult {
            user,
            access_token,
            refresh_token: refresh.token,
        })
    }

    /// Exchanges an active refresh token for a new access token.
    ///
    /// The refresh token itself stays valid.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let record = self.refresh_tokens.lookup(refresh_token).await.map_err(|e| {
            if !e.is_infrastructure() {
                warn!(reason = %e, "Refresh rejected");
            }
            AppError::from(e)
        })?;

        if self.users.find_by_id(record.user_id).await?.is_none() {
            warn!(user_id = %record.user_id, "Refresh rejected: account no longer exists");
            return Err(AuthError::NotFound.into());
        }

        let token = self.encoder.issue(record.user_id, self.default_ttl)?;
        info!(user_id = %record.user_id, "Access token refreshed");
        Ok(token)
    }

    /// Revokes a refresh token. Unknown or already revoked tokens succeed.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        self.refresh_tokens.revoke(refresh_token).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirpy_auth::JwtDecoder;
    use chirpy_core::config::HashingConfig;
    use chirpy_core::error::ErrorKind;
    use chirpy_core::traits::ManualClock;
    use chirpy_database::memory::{MemoryRefreshTokenRepository, MemoryUserRepository};
    use chirpy_entity::user::CreateUser;

    struct Fixture {
        service: SessionService,
        decoder: JwtDecoder,
        clock: Arc<ManualClock>,
        users: Arc<MemoryUserRepository>,
    }

    async fn fixture() -> Fixture {
        let config = AuthConfig::default();
        let clock = Arc::new(ManualClock::starting_now());
        let hasher = Arc::new(
            PasswordHasher::new(&HashingConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );
        let users = Arc::new(MemoryUserRepository::new());
        users
            .create(&CreateUser {
                email: "walt@breakingbad.com".into(),
                hashed_password: hasher.hash("04234").unwrap(),
            })
            .await
            .unwrap();

        let store = Arc::new(RefreshTokenStore::new(
            Arc::new(MemoryRefreshTokenRepository::new()),
            clock.clone(),
            config.refresh_token_ttl_days,
        ));
        let service = SessionService::new(
            users.clone(),
            hasher,
            Arc::new(JwtEncoder::new(&config, clock.clone())),
            store,
            &config,
        );

        Fixture {
            service,
            decoder: JwtDecoder::new(&config, clock.clone()),
            clock,
            users,
        }
    }

    #[tokio::test]
    async fn test_login_issues_both_tokens() {
        let f = fixture().await;
        let result = f
            .service
            .login("walt@breakingbad.com", "04234", None)
            .await
            .unwrap();

        assert_eq!(f.decoder.validate(&result.access_token).unwrap(), result.user.id);
        assert_eq!(result.refresh_token.len(), 64);
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let f = fixture().await;
        let wrong = f
            .service
            .login("walt@breakingbad.com", "wrong", None)
            .await
            .unwrap_err();
        let unknown = f
            .service
            .login("jesse@breakingbad.com", "04234", None)
            .await
            .unwrap_err();

        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(unknown.kind, ErrorKind::Authentication);
        assert_eq!(wrong.message, unknown.message);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_uniform_failure_logged_as_error() {
        let f = fixture().await;
        f.users
            .create(&CreateUser {
                email: "skyler@breakingbad.com".into(),
                hashed_password: "not-a-phc-string".into(),
            })
            .await
            .unwrap();

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let corrupt = f
            .service
            .login("skyler@breakingbad.com", "anything", None)
            .await
            .unwrap_err();
        let wrong = f
            .service
            .login("walt@breakingbad.com", "wrong", None)
            .await
            .unwrap_err();

        assert_eq!(corrupt.kind, ErrorKind::Authentication);
        assert_eq!(corrupt.message, wrong.message);

        let output = logs.contents();
        let corrupt_line = output
            .lines()
            .find(|l| l.contains("unusable stored hash"))
            .expect("corrupt hash is logged");
        assert!(corrupt_line.contains("ERROR"), "{corrupt_line}");
        let wrong_line = output
            .lines()
            .find(|l| l.contains("wrong password"))
            .expect("mismatch is logged");
        assert!(wrong_line.contains("WARN"), "{wrong_line}");
    }

    #[tokio::test]
    async fn test_requested_ttl_is_capped() {
        let f = fixture().await;
        assert_eq!(f.service.access_ttl(None), Duration::from_secs(3600));
        assert_eq!(f.service.access_ttl(Some(0)), Duration::from_secs(3600));
        assert_eq!(f.service.access_ttl(Some(60)), Duration::from_secs(60));
        assert_eq!(f.service.access_ttl(Some(86_400)), Duration::from_secs(3600));

        let result = f
            .service
            .login("walt@breakingbad.com", "04234", Some(86_400))
            .await
            .unwrap();
        let claims = f.decoder.decode(&result.access_token).unwrap();
        assert_eq!(claims.expires_at - claims.issued_at, 3600);
    }

    #[tokio::test]
    async fn test_refresh_without_rotation_then_revoke() {
        let f = fixture().await;
        let login = f
            .service
            .login("walt@breakingbad.com", "04234", None)
            .await
            .unwrap();

        f.clock.advance(chrono::Duration::hours(2));
        assert!(f.decoder.validate(&login.access_token).is_err());

        let first = f.service.refresh(&login.refresh_token).await.unwrap();
        let second = f.service.refresh(&login.refresh_token).await.unwrap();
        assert_eq!(f.decoder.validate(&first).unwrap(), login.user.id);
        assert_eq!(f.decoder.validate(&second).unwrap(), login.user.id);

        f.service.revoke(&login.refresh_token).await.unwrap();
        f.service.revoke(&login.refresh_token).await.unwrap();
        let err = f.service.refresh(&login.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_account() {
        let f = fixture().await;
        let login = f
            .service
            .login("walt@breakingbad.com", "04234", None)
            .await
            .unwrap();
        f.users.delete_all().await.unwrap();

        let err = f.service.refresh(&login.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
