//! Statistics endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use services::ZooStatistics;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /statistics: counts of animals, enclosures and feeding schedules.
pub async fn get(State(state): State<Arc<AppState>>) -> Result<Json<ZooStatistics>, ApiError> {
    let statistics = state.statistics.snapshot().await?;
    Ok(Json(statistics))
}
