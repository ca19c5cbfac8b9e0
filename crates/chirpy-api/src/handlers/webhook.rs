//! Billing webhook handler.

use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::WebhookRequest;
use crate::error::ApiError;
use crate::extractors::{ApiJson, WebhookCaller};
use crate::state::AppState;

/// POST /api/polka/webhooks
pub async fn polka_webhook(
    State(state): State<AppState>,
    _caller: WebhookCaller,
    ApiJson(req): ApiJson<WebhookRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .webhook_service
        .handle(&req.event, req.data.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
