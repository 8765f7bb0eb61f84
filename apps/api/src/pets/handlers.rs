use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::ident::UserId;
use crate::models::animal::AnimalRow;
use crate::pets::store::{self, NewPet};
use crate::state::AppState;
use crate::users;

/// GET /api/users/:user_id/pets
pub async fn handle_user_pets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<AnimalRow>>, AppError> {
    let pets = store::pets_by_user(&state.db, user_id).await?;
    info!("Found {} pets for user {user_id}", pets.len());
    Ok(Json(pets))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: String,
    pub sex: String,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<String>,
    #[serde(rename = "type")]
    pub animal_type: String,
    pub species: String,
    pub breed: Option<String>,
    pub located_name: Option<String>,
}

/// POST /api/users/:user_id/pets
///
/// A client adding their first pet is promoted to owner.
pub async fn handle_create_pet(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    UserId(header_user_id): UserId,
    Json(req): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<AnimalRow>), AppError> {
    if user_id != header_user_id {
        return Err(AppError::Forbidden(
            "You can only create pets for yourself".to_string(),
        ));
    }
    if users::store::find_user(&state.db, user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }

    users::store::ensure_owner(&state.db, user_id).await?;
    let pet = store::insert_pet(
        &state.db,
        NewPet {
            owner_id: user_id,
            name: &req.name,
            sex: &req.sex,
            date_of_birth: req.date_of_birth,
            photo_url: req.photo_url.as_deref(),
            animal_type: &req.animal_type,
            species: &req.species,
            breed: req.breed.as_deref(),
            located_name: req.located_name.as_deref(),
        },
    )
    .await?;

    info!("Pet {} created for user {user_id}", pet.animal_id);
    Ok((StatusCode::CREATED, Json(pet)))
}
