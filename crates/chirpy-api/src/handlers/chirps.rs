//! Chirp handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use chirpy_core::error::AppError;
use chirpy_core::types::{SortDirection, UserId};

use crate::dto::request::{CreateChirpRequest, ListChirpsQuery};
use crate::dto::response::ChirpResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, parse_chirp_id};
use crate::state::AppState;

/// POST /api/chirps
pub async fn create_chirp(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateChirpRequest>,
) -> Result<(StatusCode, Json<ChirpResponse>), ApiError> {
    let chirp = state.chirp_service.create(auth.context(), &req.body).await?;
    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// GET /api/chirps
pub async fn list_chirps(
    State(state): State<AppState>,
    Query(query): Query<ListChirpsQuery>,
) -> Result<Json<Vec<ChirpResponse>>, ApiError> {
    let author = match query.author_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<UserId>()
                .map_err(|_| AppError::validation(format!("Invalid author ID: {raw}")))?,
        ),
    };
    let sort = SortDirection::from_query(query.sort.as_deref())?;

    let chirps = state.chirp_service.list(author, sort).await?;
    Ok(Json(chirps.into_iter().map(Into::into).collect()))
}

/// GET /api/chirps/{id}
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChirpResponse>, ApiError> {
    let chirp = state.chirp_service.get(parse_chirp_id(&id)?).await?;
    Ok(Json(chirp.into()))
}

/// DELETE /api/chirps/{id}
pub async fn delete_chirp(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .chirp_service
        .delete(auth.context(), parse_chirp_id(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
