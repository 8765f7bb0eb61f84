use bigdecimal::BigDecimal;
use sqlx::PgPool;

use crate::models::listing::{ListingRow, ListingStatus};

/// New listings always start ACTIVE.
pub async fn create_listing(
    pool: &PgPool,
    owner_id: i64,
    animal_id: i64,
    price: &BigDecimal,
    description: Option<&str>,
) -> Result<ListingRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO listings (owner_id, animal_id, status, price, description, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING *
        "#,
    )
    .bind(owner_id)
    .bind(animal_id)
    .bind(ListingStatus::Active)
    .bind(price)
    .bind(description)
    .fetch_one(pool)
    .await
}

pub async fn find_listing(
    pool: &PgPool,
    listing_id: i64,
) -> Result<Option<ListingRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM listings WHERE listing_id = $1")
        .bind(listing_id)
        .fetch_optional(pool)
        .await
}

pub async fn listings_by_owner(
    pool: &PgPool,
    owner_id: i64,
) -> Result<Vec<ListingRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM listings WHERE owner_id = $1 ORDER BY created_at DESC")
        .bind(owner_id)
        .fetch_all(pool)
        .await
}

/// Every listing regardless of status, for the moderation view.
pub async fn all_listings(pool: &PgPool) -> Result<Vec<ListingRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM listings ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn listings_by_status(
    pool: &PgPool,
    status: ListingStatus,
) -> Result<Vec<ListingRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM listings WHERE status = $1 ORDER BY created_at DESC")
        .bind(status)
        .fetch_all(pool)
        .await
}

pub async fn update_status(
    pool: &PgPool,
    listing_id: i64,
    status: ListingStatus,
) -> Result<ListingRow, sqlx::Error> {
    sqlx::query_as("UPDATE listings SET status = $2 WHERE listing_id = $1 RETURNING *")
        .bind(listing_id)
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn delete_listing(pool: &PgPool, listing_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM listings WHERE listing_id = $1")
        .bind(listing_id)
        .execute(pool)
        .await
        .map(|_| ())
}
