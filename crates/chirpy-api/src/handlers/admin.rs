//! Development maintenance handlers.

use axum::Json;
use axum::extract::State;

use chirpy_service::PurgeReport;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /admin/reset
pub async fn reset(State(state): State<AppState>) -> Result<Json<PurgeReport>, ApiError> {
    let report = state.admin_service.purge().await?;
    Ok(Json(report))
}
