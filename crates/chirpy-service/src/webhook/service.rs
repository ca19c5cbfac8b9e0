//! Applies billing provider events to accounts.

use std::sync::Arc;

use tracing::{debug, info};

use chirpy_core::error::AppError;
use chirpy_core::types::UserId;
use chirpy_database::UserRepository;

/// Event name that grants the paid membership.
pub const USER_UPGRADED: &str = "user.upgraded";

/// What a webhook delivery did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The account was upgraded.
    Upgraded,
    /// The event is not one we act on.
    Ignored,
}

/// Handles events from the billing provider.
#[derive(Clone)]
pub struct WebhookService {
    users: Arc<dyn UserRepository>,
}

impl WebhookService {
    /// Creates a new webhook service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Applies one event. Upgrading an unknown account is `NotFound`.
    pub async fn handle(&self, event: &str, user_id: UserId) -> Result<WebhookOutcome, AppError> {
        if event != USER_UPGRADED {
            debug!(event, "Ignoring webhook event");
            return Ok(WebhookOutcome::Ignored);
        }

        if !self.users.upgrade_to_red(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %user_id, "Account upgraded to Chirpy Red");
        Ok(WebhookOutcome::Upgraded)
    }
}
