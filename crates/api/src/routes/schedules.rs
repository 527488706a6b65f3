//! Feeding schedule endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{AnimalId, ScheduleId};
use domain::{
    FeedingOccurred, FeedingSchedule, FeedingScheduleRepository, FeedingTime, NonEmptyString,
};
use serde::{Deserialize, Serialize};

use super::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub animal_id: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub feeding_time: String,
    pub food: String,
}

#[derive(Deserialize)]
pub struct UpdateScheduleTimeRequest {
    pub new_feeding_time: String,
}

#[derive(Debug, Deserialize)]
pub struct TimeRangeQuery {
    pub start: String,
    pub end: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub id: String,
    pub animal_id: String,
    pub feeding_time: String,
    pub food: String,
    pub active: bool,
}

impl From<&FeedingSchedule> for ScheduleResponse {
    fn from(schedule: &FeedingSchedule) -> Self {
        Self {
            id: schedule.id().to_string(),
            animal_id: schedule.animal_id().to_string(),
            feeding_time: schedule.time().to_string(),
            food: schedule.food().to_string(),
            active: schedule.is_active(),
        }
    }
}

fn to_responses(schedules: &[FeedingSchedule]) -> Vec<ScheduleResponse> {
    schedules.iter().map(ScheduleResponse::from).collect()
}

// -- Handlers --

/// GET /feeding-schedules: list all schedules.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let schedules = state.repos.schedules.get_all().await?;
    Ok(Json(to_responses(&schedules)))
}

/// GET /feeding-schedules/active: schedules that have not been cancelled.
#[tracing::instrument(skip(state))]
pub async fn active(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let schedules = state.repos.schedules.get_active().await?;
    Ok(Json(to_responses(&schedules)))
}

/// GET /feeding-schedules/time-range?start=..&end=..: schedules within an inclusive window.
#[tracing::instrument(skip(state))]
pub async fn time_range(
    State(state): State<Arc<AppState>>,
    Query(range): Query<TimeRangeQuery>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let start: FeedingTime = range.start.parse()?;
    let end: FeedingTime = range.end.parse()?;
    if start > end {
        return Err(ApiError::BadRequest(
            "Start time must be earlier than end time".to_string(),
        ));
    }

    let schedules = state.repos.schedules.get_for_time_range(start, end).await?;
    Ok(Json(to_responses(&schedules)))
}

/// POST /feeding-schedules: schedule a feeding for an existing animal.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    let animal_id: AnimalId = parse_id("animal", &req.animal_id)?;
    let time: FeedingTime = req.feeding_time.parse()?;
    let food = NonEmptyString::new("food", req.food)?;

    let schedule = state
        .feeding
        .create_feeding_schedule(animal_id, time, food)
        .await?;
    Ok((StatusCode::CREATED, Json(ScheduleResponse::from(&schedule))))
}

/// GET /feeding-schedules/{id}: load a schedule by ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule_id: ScheduleId = parse_id("feeding schedule", &id)?;
    let schedule = state
        .repos
        .schedules
        .get_by_id(schedule_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Feeding schedule {schedule_id} not found")))?;
    Ok(Json(ScheduleResponse::from(&schedule)))
}

/// DELETE /feeding-schedules/{id}: remove a schedule.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let schedule_id: ScheduleId = parse_id("feeding schedule", &id)?;
    if state.repos.schedules.get_by_id(schedule_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Feeding schedule {schedule_id} not found"
        )));
    }

    state.repos.schedules.delete(schedule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /feeding-schedules/{id}/time: move a schedule to another time of day.
#[tracing::instrument(skip(state, req))]
pub async fn update_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateScheduleTimeRequest>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule_id: ScheduleId = parse_id("feeding schedule", &id)?;
    let time: FeedingTime = req.new_feeding_time.parse()?;

    let schedule = state
        .feeding
        .update_feeding_schedule(schedule_id, time)
        .await?;
    Ok(Json(ScheduleResponse::from(&schedule)))
}

/// POST /feeding-schedules/{id}/cancel: deactivate a schedule.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule_id: ScheduleId = parse_id("feeding schedule", &id)?;
    let schedule = state.feeding.cancel_feeding_schedule(schedule_id).await?;
    Ok(Json(ScheduleResponse::from(&schedule)))
}

/// POST /feeding-schedules/{id}/restore: reactivate a schedule.
#[tracing::instrument(skip(state))]
pub async fn restore(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule_id: ScheduleId = parse_id("feeding schedule", &id)?;
    let schedule = state.feeding.restore_feeding_schedule(schedule_id).await?;
    Ok(Json(ScheduleResponse::from(&schedule)))
}

/// POST /feeding-schedules/{id}/execute: feed the animal now.
#[tracing::instrument(skip(state))]
pub async fn execute(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedingOccurred>, ApiError> {
    let schedule_id: ScheduleId = parse_id("feeding schedule", &id)?;
    let event = state.feeding.execute_feeding(schedule_id).await?;
    Ok(Json(event))
}
