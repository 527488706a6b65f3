//! Enclosure endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::EnclosureId;
use domain::{AnimalRepository, AnimalType, Enclosure, EnclosureRepository, PositiveInteger};
use serde::{Deserialize, Serialize};

use super::animals::{AnimalResponse, to_responses};
use super::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateEnclosureRequest {
    pub animal_type: String,
    pub size: i64,
    pub max_capacity: i64,
}

#[derive(Serialize)]
pub struct EnclosureResponse {
    pub id: String,
    pub animal_type: String,
    pub size: u32,
    pub max_capacity: u32,
    pub is_cleaned: bool,
    pub animal_ids: Vec<String>,
    pub animal_count: usize,
}

impl From<&Enclosure> for EnclosureResponse {
    fn from(enclosure: &Enclosure) -> Self {
        Self {
            id: enclosure.id().to_string(),
            animal_type: enclosure.animal_type().to_string(),
            size: enclosure.size().get(),
            max_capacity: enclosure.max_capacity().get(),
            is_cleaned: enclosure.is_cleaned(),
            animal_ids: enclosure
                .animal_ids()
                .iter()
                .map(ToString::to_string)
                .collect(),
            animal_count: enclosure.animal_count(),
        }
    }
}

/// GET /enclosures: list all enclosures.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EnclosureResponse>>, ApiError> {
    let enclosures = state.repos.enclosures.get_all().await?;
    Ok(Json(enclosures.iter().map(EnclosureResponse::from).collect()))
}

/// POST /enclosures: create an empty, clean enclosure.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEnclosureRequest>,
) -> Result<(StatusCode, Json<EnclosureResponse>), ApiError> {
    let animal_type: AnimalType = req.animal_type.parse()?;
    let size = PositiveInteger::new("size", req.size)?;
    let max_capacity = PositiveInteger::new("max capacity", req.max_capacity)?;

    let enclosure = Enclosure::new(animal_type, size, max_capacity);
    state.repos.enclosures.add(enclosure.clone()).await?;

    tracing::info!(enclosure_id = %enclosure.id(), "enclosure created");
    Ok((StatusCode::CREATED, Json(EnclosureResponse::from(&enclosure))))
}

/// GET /enclosures/{id}: load an enclosure by ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EnclosureResponse>, ApiError> {
    let enclosure = load(&state, &id).await?;
    Ok(Json(EnclosureResponse::from(&enclosure)))
}

/// DELETE /enclosures/{id}: remove an enclosure that houses no animals.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let _gate = state.gate.enter().await;
    let enclosure = load(&state, &id).await?;

    let residents = state.repos.animals.get_by_enclosure(enclosure.id()).await?;
    if !residents.is_empty() || enclosure.animal_count() > 0 {
        return Err(ApiError::BadRequest(
            "Cannot delete enclosure that contains animals".to_string(),
        ));
    }

    state.repos.enclosures.delete(enclosure.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /enclosures/{id}/clean: mark an enclosure clean.
#[tracing::instrument(skip(state))]
pub async fn clean(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EnclosureResponse>, ApiError> {
    let _gate = state.gate.enter().await;
    let mut enclosure = load(&state, &id).await?;

    enclosure.clean();
    state.repos.enclosures.update(enclosure.clone()).await?;

    Ok(Json(EnclosureResponse::from(&enclosure)))
}

/// GET /enclosures/{id}/animals: animals placed in an enclosure.
#[tracing::instrument(skip(state))]
pub async fn animals(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AnimalResponse>>, ApiError> {
    let enclosure = load(&state, &id).await?;
    let animals = state.repos.animals.get_by_enclosure(enclosure.id()).await?;
    Ok(Json(to_responses(&animals)))
}

async fn load(state: &AppState, raw_id: &str) -> Result<Enclosure, ApiError> {
    let enclosure_id: EnclosureId = parse_id("enclosure", raw_id)?;
    state
        .repos
        .enclosures
        .get_by_id(enclosure_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Enclosure {enclosure_id} not found")))
}
