use axum::extract::State;
use axum::Json;

use crate::dto::VisitorCountResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn count(State(state): State<AppState>) -> Result<Json<VisitorCountResponse>, AppError> {
    let count = state.storage.visitor_count().await?;
    Ok(Json(VisitorCountResponse { count }))
}

pub async fn record_visit(
    State(state): State<AppState>,
) -> Result<Json<VisitorCountResponse>, AppError> {
    let count = state.storage.record_visit().await?;
    Ok(Json(VisitorCountResponse { count }))
}
