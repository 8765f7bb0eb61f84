use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::ident::UserId;
use crate::models::review::ReviewRow;
use crate::reviews::store;
use crate::state::AppState;
use crate::users;

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/reviews/:target_user_id
pub async fn handle_create_review(
    State(state): State<AppState>,
    Path(target_user_id): Path<i64>,
    UserId(reviewer_id): UserId,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewRow>), AppError> {
    validate_rating(req.rating)?;

    if users::store::find_user(&state.db, reviewer_id).await?.is_none() {
        return Err(AppError::NotFound("Reviewer not found".to_string()));
    }
    if users::store::find_user(&state.db, target_user_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Target user not found".to_string()));
    }
    if store::active_review_exists(&state.db, reviewer_id, target_user_id).await? {
        return Err(AppError::Conflict(
            "You have already reviewed this user".to_string(),
        ));
    }

    let review = store::insert_review(
        &state.db,
        reviewer_id,
        target_user_id,
        req.rating,
        req.comment.as_deref(),
    )
    .await?;
    info!(
        "Review {} created - reviewer {}, target {}",
        review.review_id, reviewer_id, target_user_id
    );
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/reviews/:target_user_id
pub async fn handle_reviews_for_user(
    State(state): State<AppState>,
    Path(target_user_id): Path<i64>,
) -> Result<Json<Vec<ReviewRow>>, AppError> {
    let reviews = store::reviews_for_user(&state.db, target_user_id).await?;
    Ok(Json(reviews))
}

/// DELETE /api/reviews/:review_id — soft delete, own reviews only.
pub async fn handle_delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<StatusCode, AppError> {
    if !store::soft_delete_review(&state.db, review_id, user_id).await? {
        return Err(AppError::NotFound(format!("Review {review_id} not found")));
    }
    info!("Review {review_id} soft-deleted by user {user_id}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(matches!(validate_rating(0), Err(AppError::Validation(_))));
        assert!(matches!(validate_rating(6), Err(AppError::Validation(_))));
    }
}
