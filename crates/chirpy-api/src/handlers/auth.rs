//! Session handlers: login, refresh, revoke.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, validate};
use crate::dto::response::{LoginResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, BearerToken};
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate(&req)?;
    let result = state
        .session_service
        .login(&req.email, &req.password, req.expires_in_seconds)
        .await?;

    Ok(Json(LoginResponse {
        user: result.user.into(),
        token: result.access_token,
        refresh_token: result.refresh_token,
    }))
}

/// POST /api/refresh
///
/// The refresh token is sent as a bearer credential.
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.session_service.refresh(&refresh_token).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/revoke
pub async fn revoke(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> Result<StatusCode, ApiError> {
    state.session_service.revoke(&refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
