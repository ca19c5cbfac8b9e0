//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use chirpy_auth::{JwtDecoder, JwtEncoder, PasswordHasher, RefreshTokenStore};
use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;
use chirpy_core::traits::Clock;
use chirpy_database::Repositories;
use chirpy_service::{AdminService, ChirpService, SessionService, UserService, WebhookService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Time source for request contexts and token checks
    pub clock: Arc<dyn Clock>,

    // ── Auth ─────────────────────────────────────────────────
    /// Access token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and credential updates
    pub user_service: Arc<UserService>,
    /// Login, refresh, revoke
    pub session_service: Arc<SessionService>,
    /// Chirp CRUD
    pub chirp_service: Arc<ChirpService>,
    /// Billing webhook
    pub webhook_service: Arc<WebhookService>,
    /// Development purge
    pub admin_service: Arc<AdminService>,
}

impl AppState {
    /// Wires every component from one configuration value.
    pub fn new(
        config: AppConfig,
        repositories: Repositories,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let auth = &config.auth;

        let hasher = Arc::new(PasswordHasher::new(&auth.hashing)?);
        let jwt_encoder = Arc::new(JwtEncoder::new(auth, Arc::clone(&clock)));
        let jwt_decoder = Arc::new(JwtDecoder::new(auth, Arc::clone(&clock)));
        let refresh_tokens = Arc::new(RefreshTokenStore::new(
            Arc::clone(&repositories.refresh_tokens),
            Arc::clone(&clock),
            auth.refresh_token_ttl_days,
        ));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repositories.users),
            Arc::clone(&hasher),
        ));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&repositories.users),
            hasher,
            jwt_encoder,
            refresh_tokens,
            auth,
        ));
        let chirp_service = Arc::new(ChirpService::new(Arc::clone(&repositories.chirps)));
        let webhook_service = Arc::new(WebhookService::new(Arc::clone(&repositories.users)));
        let admin_service = Arc::new(AdminService::new(
            repositories,
            config.server.platform,
        ));

        Ok(Self {
            config: Arc::new(config),
            clock,
            jwt_decoder,
            user_service,
            session_service,
            chirp_service,
            webhook_service,
            admin_service,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("platform", &self.config.server.platform)
            .field("jwt_decoder", &self.jwt_decoder)
            .finish_non_exhaustive()
    }
}
