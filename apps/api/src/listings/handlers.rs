use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bigdecimal::BigDecimal;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::ident::UserId;
use crate::listings::store;
use crate::models::listing::{ListingRow, ListingStatus};
use crate::state::AppState;
use crate::users;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub animal_id: i64,
    pub price: BigDecimal,
    pub description: Option<String>,
}

/// POST /api/listings — owners only.
pub async fn handle_create_listing(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(req): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<ListingRow>), AppError> {
    if !users::store::is_owner(&state.db, user_id).await? {
        return Err(AppError::Forbidden(
            "Only owners can create listings".to_string(),
        ));
    }
    if req.price < BigDecimal::from(0) {
        return Err(AppError::Validation(
            "price must not be negative".to_string(),
        ));
    }

    let listing = store::create_listing(
        &state.db,
        user_id,
        req.animal_id,
        &req.price,
        req.description.as_deref(),
    )
    .await?;

    info!(
        "Listing created - ID: {}, Owner: {}, Animal: {}",
        listing.listing_id, user_id, req.animal_id
    );
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/listings/my-listings
pub async fn handle_my_listings(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<ListingRow>>, AppError> {
    if !users::store::is_owner(&state.db, user_id).await? {
        return Err(AppError::NotFound("Owner not found".to_string()));
    }
    let listings = store::listings_by_owner(&state.db, user_id).await?;
    Ok(Json(listings))
}

/// GET /api/listings/active
pub async fn handle_active_listings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListingRow>>, AppError> {
    let listings = store::listings_by_status(&state.db, ListingStatus::Active).await?;
    Ok(Json(listings))
}

/// GET /api/listings/:listing_id
pub async fn handle_get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
) -> Result<Json<ListingRow>, AppError> {
    let listing = store::find_listing(&state.db, listing_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {listing_id} not found")))?;
    Ok(Json(listing))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ListingStatus,
}

/// PATCH /api/listings/:listing_id/status — only the owning user.
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
    UserId(user_id): UserId,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ListingRow>, AppError> {
    let listing = store::find_listing(&state.db, listing_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {listing_id} not found")))?;
    if listing.owner_id != user_id {
        return Err(AppError::Forbidden(
            "You can only update your own listings".to_string(),
        ));
    }

    let updated = store::update_status(&state.db, listing_id, req.status).await?;
    info!(
        "Listing {} status changed {:?} -> {:?} by owner {}",
        listing_id, listing.status, updated.status, user_id
    );
    Ok(Json(updated))
}

/// DELETE /api/listings/:listing_id — only the owning user.
pub async fn handle_delete_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<StatusCode, AppError> {
    let listing = store::find_listing(&state.db, listing_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {listing_id} not found")))?;
    if listing.owner_id != user_id {
        return Err(AppError::Forbidden(
            "You can only delete your own listings".to_string(),
        ));
    }

    store::delete_listing(&state.db, listing_id).await?;
    info!("Listing deleted - ID: {listing_id}, Owner ID: {user_id}");
    Ok(StatusCode::NO_CONTENT)
}
