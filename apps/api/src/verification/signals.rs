//! Read-only activity signal queries: one simple aggregate per source,
//! merged and scored in-process by [`super::ranking`].

use sqlx::PgPool;

use crate::verification::ranking::{ActivityWindow, AppointmentTally};

/// Listings created per owner within the window.
pub async fn listing_counts(
    pool: &PgPool,
    window: &ActivityWindow,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT owner_id, COUNT(*)
        FROM listings
        WHERE created_at >= $1 AND created_at < $2
        GROUP BY owner_id
        "#,
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(pool)
    .await
}

/// Reviews authored per reviewer within the window (soft-deleted included —
/// writing the review was still activity).
pub async fn review_counts(
    pool: &PgPool,
    window: &ActivityWindow,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT reviewer_id, COUNT(*)
        FROM reviews
        WHERE created_at >= $1 AND created_at < $2
        GROUP BY reviewer_id
        "#,
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(pool)
    .await
}

/// Appointment outcomes per responsible owner within the window.
pub async fn appointment_tallies(
    pool: &PgPool,
    window: &ActivityWindow,
) -> Result<Vec<AppointmentTally>, sqlx::Error> {
    let rows: Vec<(i64, i64, i64, i64, i64)> = sqlx::query_as(
        r#"
        SELECT responsible_owner_id,
               COUNT(*),
               COUNT(*) FILTER (WHERE status = 'DONE'),
               COUNT(*) FILTER (WHERE status = 'NO_SHOW'),
               COUNT(*) FILTER (WHERE status = 'CANCELLED')
        FROM appointments
        WHERE date_time >= $1 AND date_time < $2
        GROUP BY responsible_owner_id
        "#,
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(user_id, total, done, no_show, cancelled)| AppointmentTally {
            user_id,
            total,
            done,
            no_show,
            cancelled,
        })
        .collect())
}

/// All-time favorites saved per client. Deliberately unwindowed.
pub async fn favorite_counts(pool: &PgPool) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as("SELECT client_id, COUNT(*) FROM favorite_listings GROUP BY client_id")
        .fetch_all(pool)
        .await
}
