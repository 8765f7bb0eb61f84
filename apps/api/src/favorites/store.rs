use sqlx::PgPool;

use crate::models::listing::ListingRow;

/// Inserts a favorite pair. Returns false when the pair already exists
/// (the unique constraint makes the insert a no-op).
pub async fn insert_favorite(
    pool: &PgPool,
    client_id: i64,
    listing_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO favorite_listings (client_id, listing_id)
        VALUES ($1, $2)
        ON CONFLICT (client_id, listing_id) DO NOTHING
        "#,
    )
    .bind(client_id)
    .bind(listing_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Deletes a favorite pair. Returns false when no such favorite existed.
pub async fn delete_favorite(
    pool: &PgPool,
    client_id: i64,
    listing_id: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM favorite_listings WHERE client_id = $1 AND listing_id = $2")
            .bind(client_id)
            .bind(listing_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn favorited_listings(
    pool: &PgPool,
    client_id: i64,
) -> Result<Vec<ListingRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT l.*
        FROM listings l
        JOIN favorite_listings fl ON fl.listing_id = l.listing_id
        WHERE fl.client_id = $1
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(client_id)
    .fetch_all(pool)
    .await
}

pub async fn is_favorited(
    pool: &PgPool,
    client_id: i64,
    listing_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM favorite_listings WHERE client_id = $1 AND listing_id = $2)",
    )
    .bind(client_id)
    .bind(listing_id)
    .fetch_one(pool)
    .await
}
