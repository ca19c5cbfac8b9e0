//! Account handlers: register, update credentials.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{CredentialsRequest, validate};
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate(&req)?;
    let user = state.user_service.register(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    validate(&req)?;
    let user = state
        .user_service
        .update_credentials(auth.context(), &req.email, &req.password)
        .await?;
    Ok(Json(user.into()))
}
