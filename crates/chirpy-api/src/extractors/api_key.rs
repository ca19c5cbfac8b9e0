//! `ApiKey` extractor for the billing webhook caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::warn;

use chirpy_auth::{constant_time_eq, extract_api_key};
use chirpy_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Proof that the request carried the configured webhook API key.
#[derive(Debug, Clone, Copy)]
pub struct WebhookCaller;

impl FromRequestParts<AppState> for WebhookCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = extract_api_key(&parts.headers).map_err(|e| {
            warn!(reason = %e, "Rejected webhook credential");
            ApiError::from(e)
        })?;

        let expected = state.config.auth.polka_key.as_bytes();
        if expected.is_empty() || !constant_time_eq(key.as_bytes(), expected) {
            warn!("Rejected webhook credential: key mismatch");
            return Err(AppError::authentication("Invalid API key").into());
        }

        Ok(WebhookCaller)
    }
}
