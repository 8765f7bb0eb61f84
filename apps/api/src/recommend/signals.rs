//! Read-only signal queries feeding the recommendation engine. Never mutate
//! state; every call reflects the current database contents.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::recommend::engine::{AnimalTraits, CandidateListing, Favorite, LikedListing};

#[derive(FromRow)]
struct LikedListingRow {
    listing_id: i64,
    created_at: DateTime<Utc>,
    species: String,
    breed: Option<String>,
    located_name: Option<String>,
}

/// All listings the user has favorited, with the animal traits needed for
/// content similarity.
pub async fn liked_listings(pool: &PgPool, user_id: i64) -> Result<Vec<LikedListing>, sqlx::Error> {
    let rows: Vec<LikedListingRow> = sqlx::query_as(
        r#"
        SELECT l.listing_id, l.created_at, a.species, a.breed, a.located_name
        FROM favorite_listings fl
        JOIN listings l ON l.listing_id = fl.listing_id
        JOIN animals a ON a.animal_id = l.animal_id
        WHERE fl.client_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| LikedListing {
            listing_id: r.listing_id,
            created_at: r.created_at,
            traits: AnimalTraits {
                species: r.species,
                breed: r.breed,
                located_name: r.located_name,
            },
        })
        .collect())
}

/// Favorites other users hold on the given listings — the raw material for
/// the similar-user overlap.
pub async fn co_favorites(
    pool: &PgPool,
    user_id: i64,
    listing_ids: &[i64],
) -> Result<Vec<Favorite>, sqlx::Error> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT client_id, listing_id
        FROM favorite_listings
        WHERE listing_id = ANY($1) AND client_id <> $2
        "#,
    )
    .bind(listing_ids)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(client_id, listing_id)| Favorite {
            client_id,
            listing_id,
        })
        .collect())
}

/// Every favorite held by the given users (the similar-user set).
pub async fn favorites_of_users(
    pool: &PgPool,
    user_ids: &[i64],
) -> Result<Vec<Favorite>, sqlx::Error> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT client_id, listing_id FROM favorite_listings WHERE client_id = ANY($1)",
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(client_id, listing_id)| Favorite {
            client_id,
            listing_id,
        })
        .collect())
}

#[derive(FromRow)]
struct CandidateRow {
    listing_id: i64,
    title: String,
    created_at: DateTime<Utc>,
    species: String,
    breed: Option<String>,
    located_name: Option<String>,
}

/// Recommendation-eligible listings: ACTIVE, not owned by the requester and
/// not already favorited by them.
pub async fn eligible_candidates(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<CandidateListing>, sqlx::Error> {
    let rows: Vec<CandidateRow> = sqlx::query_as(
        r#"
        SELECT l.listing_id, a.name AS title, l.created_at,
               a.species, a.breed, a.located_name
        FROM listings l
        JOIN animals a ON a.animal_id = l.animal_id
        WHERE l.status = 'ACTIVE'
          AND l.owner_id <> $1
          AND NOT EXISTS (
              SELECT 1 FROM favorite_listings fl
              WHERE fl.client_id = $1 AND fl.listing_id = l.listing_id
          )
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| CandidateListing {
            listing_id: r.listing_id,
            title: r.title,
            created_at: r.created_at,
            traits: AnimalTraits {
                species: r.species,
                breed: r.breed,
                located_name: r.located_name,
            },
        })
        .collect())
}
