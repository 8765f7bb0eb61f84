use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::review::ReviewRow;

/// True when the reviewer already holds a live (non-deleted) review of the
/// target. A soft-deleted review does not block a new one.
pub async fn active_review_exists(
    pool: &PgPool,
    reviewer_id: i64,
    target_user_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM reviews r
            JOIN user_reviews ur ON ur.review_id = r.review_id
            WHERE r.reviewer_id = $1 AND ur.target_user_id = $2 AND NOT r.is_deleted
        )
        "#,
    )
    .bind(reviewer_id)
    .bind(target_user_id)
    .fetch_one(pool)
    .await
}

/// Inserts the review row and its target-user link in one transaction.
pub async fn insert_review(
    pool: &PgPool,
    reviewer_id: i64,
    target_user_id: i64,
    rating: i32,
    comment: Option<&str>,
) -> Result<ReviewRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (review_id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO reviews (reviewer_id, rating, comment, created_at, is_deleted)
        VALUES ($1, $2, $3, NOW(), FALSE)
        RETURNING review_id, created_at
        "#,
    )
    .bind(reviewer_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_reviews (review_id, target_user_id) VALUES ($1, $2)")
        .bind(review_id)
        .bind(target_user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(ReviewRow {
        review_id,
        reviewer_id,
        target_user_id,
        rating,
        comment: comment.map(str::to_string),
        created_at,
        is_deleted: false,
    })
}

/// Live reviews about a user, newest first.
pub async fn reviews_for_user(
    pool: &PgPool,
    target_user_id: i64,
) -> Result<Vec<ReviewRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT r.review_id, r.reviewer_id, ur.target_user_id,
               r.rating, r.comment, r.created_at, r.is_deleted
        FROM reviews r
        JOIN user_reviews ur ON ur.review_id = r.review_id
        WHERE ur.target_user_id = $1 AND NOT r.is_deleted
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(target_user_id)
    .fetch_all(pool)
    .await
}

/// Soft-deletes the reviewer's own review. Returns false when no live review
/// matched.
pub async fn soft_delete_review(
    pool: &PgPool,
    review_id: i64,
    reviewer_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE reviews
        SET is_deleted = TRUE
        WHERE review_id = $1 AND reviewer_id = $2 AND NOT is_deleted
        "#,
    )
    .bind(review_id)
    .bind(reviewer_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}
