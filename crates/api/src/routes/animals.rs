//! Animal endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{AnimalId, EnclosureId};
use domain::{
    Animal, AnimalMoved, AnimalRepository, AnimalType, BirthDate, FeedingScheduleRepository,
    Gender, HealthStatus, NonEmptyString, Species,
};
use serde::{Deserialize, Serialize};

use super::parse_id;
use super::schedules::ScheduleResponse;
use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateAnimalRequest {
    pub species: String,
    pub animal_type: String,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    pub is_male: bool,
    pub favorite_food: String,
    pub is_healthy: bool,
}

#[derive(Deserialize)]
pub struct FeedAnimalRequest {
    pub food: String,
}

#[derive(Deserialize)]
pub struct TransferAnimalRequest {
    pub target_enclosure_id: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct AnimalResponse {
    pub id: String,
    pub species: String,
    pub animal_type: String,
    pub name: String,
    pub birth_date: String,
    pub gender: String,
    pub favorite_food: String,
    pub health_status: String,
    pub enclosure_id: Option<String>,
}

impl From<&Animal> for AnimalResponse {
    fn from(animal: &Animal) -> Self {
        Self {
            id: animal.id().to_string(),
            species: animal.species().name().to_string(),
            animal_type: animal.species().animal_type().to_string(),
            name: animal.name().to_string(),
            birth_date: animal.birth_date().to_string(),
            gender: animal.gender().to_string(),
            favorite_food: animal.favorite_food().to_string(),
            health_status: animal.health_status().to_string(),
            enclosure_id: animal.enclosure_id().map(|id| id.to_string()),
        }
    }
}

pub(crate) fn to_responses(animals: &[Animal]) -> Vec<AnimalResponse> {
    animals.iter().map(AnimalResponse::from).collect()
}

// -- Handlers --

/// GET /animals: list all animals.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<AnimalResponse>>, ApiError> {
    let animals = state.repos.animals.get_all().await?;
    Ok(Json(to_responses(&animals)))
}

/// POST /animals: create an animal from validated fields.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAnimalRequest>,
) -> Result<(StatusCode, Json<AnimalResponse>), ApiError> {
    let animal_type: AnimalType = req.animal_type.parse()?;
    let species = Species::new(NonEmptyString::new("species", req.species)?, animal_type);
    let name = NonEmptyString::new("name", req.name)?;
    let birth_date: BirthDate = req.birth_date.parse()?;
    let gender = if req.is_male {
        Gender::Male
    } else {
        Gender::Female
    };
    let favorite_food = NonEmptyString::new("favorite food", req.favorite_food)?;
    let health_status = if req.is_healthy {
        HealthStatus::Healthy
    } else {
        HealthStatus::Sick
    };

    let animal = Animal::new(species, name, birth_date, gender, favorite_food, health_status);
    state.repos.animals.add(animal.clone()).await?;

    tracing::info!(animal_id = %animal.id(), "animal created");
    Ok((StatusCode::CREATED, Json(AnimalResponse::from(&animal))))
}

/// GET /animals/{id}: load an animal by ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnimalResponse>, ApiError> {
    let animal = load(&state, &id).await?;
    Ok(Json(AnimalResponse::from(&animal)))
}

/// DELETE /animals/{id}: remove an animal.
///
/// Enclosures still listing the animal are left as they are.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let animal = load(&state, &id).await?;
    if let Some(enclosure_id) = animal.enclosure_id() {
        tracing::warn!(animal_id = %animal.id(), %enclosure_id, "deleting animal still placed in an enclosure");
    }
    state.repos.animals.delete(animal.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /animals/{id}/feed: feed an animal outside any schedule.
#[tracing::instrument(skip(state, req))]
pub async fn feed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<FeedAnimalRequest>,
) -> Result<Json<AnimalResponse>, ApiError> {
    let _gate = state.gate.enter().await;
    let mut animal = load(&state, &id).await?;

    let food = NonEmptyString::new("food", req.food)?;
    animal.feed(&food);
    state.repos.animals.update(animal.clone()).await?;

    Ok(Json(AnimalResponse::from(&animal)))
}

/// POST /animals/{id}/heal: mark an animal healthy.
#[tracing::instrument(skip(state))]
pub async fn heal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnimalResponse>, ApiError> {
    let _gate = state.gate.enter().await;
    let mut animal = load(&state, &id).await?;

    animal.heal();
    state.repos.animals.update(animal.clone()).await?;

    Ok(Json(AnimalResponse::from(&animal)))
}

/// POST /animals/{id}/transfer: move an animal into another enclosure.
#[tracing::instrument(skip(state, req))]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TransferAnimalRequest>,
) -> Result<Json<AnimalMoved>, ApiError> {
    let animal_id: AnimalId = parse_id("animal", &id)?;
    let enclosure_id: EnclosureId = parse_id("enclosure", &req.target_enclosure_id)?;

    let event = state
        .transfers
        .transfer_animal(animal_id, enclosure_id)
        .await?;
    Ok(Json(event))
}

/// GET /animals/{id}/feeding-schedules: schedules of one animal.
#[tracing::instrument(skip(state))]
pub async fn feeding_schedules(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let animal = load(&state, &id).await?;
    let schedules = state.repos.schedules.get_by_animal(animal.id()).await?;
    Ok(Json(schedules.iter().map(ScheduleResponse::from).collect()))
}

async fn load(state: &AppState, raw_id: &str) -> Result<Animal, ApiError> {
    let animal_id: AnimalId = parse_id("animal", raw_id)?;
    state
        .repos
        .animals
        .get_by_id(animal_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Animal {animal_id} not found")))
}
