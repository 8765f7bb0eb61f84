use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::favorites::store;
use crate::ident::UserId;
use crate::listings;
use crate::models::listing::ListingRow;
use crate::state::AppState;
use crate::users;

/// POST /api/favorites/:listing_id
pub async fn handle_add_favorite(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if !users::store::is_client(&state.db, user_id).await? {
        return Err(AppError::NotFound("Client not found".to_string()));
    }
    if listings::store::find_listing(&state.db, listing_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("Listing {listing_id} not found")));
    }

    if !store::insert_favorite(&state.db, user_id, listing_id).await? {
        return Err(AppError::Conflict("Listing already favorited".to_string()));
    }
    info!("Added favorite - User: {user_id}, Listing: {listing_id}");
    Ok((StatusCode::CREATED, Json(json!({"message": "Added to favorites"}))))
}

/// DELETE /api/favorites/:listing_id
pub async fn handle_remove_favorite(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<Json<Value>, AppError> {
    if !store::delete_favorite(&state.db, user_id, listing_id).await? {
        return Err(AppError::NotFound("Favorite not found".to_string()));
    }
    info!("Removed favorite - User: {user_id}, Listing: {listing_id}");
    Ok(Json(json!({"message": "Removed from favorites"})))
}

/// GET /api/favorites
pub async fn handle_list_favorites(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<ListingRow>>, AppError> {
    let favorites = store::favorited_listings(&state.db, user_id).await?;
    Ok(Json(favorites))
}

/// GET /api/favorites/:listing_id/is-favorited
///
/// An unknown client or listing simply reads as "not favorited".
pub async fn handle_is_favorited(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<Json<Value>, AppError> {
    let is_favorited = store::is_favorited(&state.db, user_id, listing_id).await?;
    Ok(Json(json!({"isFavorited": is_favorited})))
}
