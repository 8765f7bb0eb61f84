pub mod handlers;
pub mod ranking;
pub mod signals;

use sqlx::PgPool;
use tracing::{debug, error, info};

use crate::verification::ranking::ACTIVITY_WINDOW_DAYS;

/// The current top-10 most active user ids, most active first.
///
/// Recomputed from scratch on every call; verification is advisory, so a
/// failed query degrades to an empty ranking ("nobody verified") rather than
/// an error.
pub async fn top_active_user_ids(pool: &PgPool) -> Vec<i64> {
    match compute_ranking(pool).await {
        Ok(ids) => {
            info!("Found {} top active users", ids.len());
            ids
        }
        Err(e) => {
            error!("Activity ranking failed: {e}");
            Vec::new()
        }
    }
}

/// True iff the user appears in a fresh top-10 ranking. No caching.
pub async fn is_user_verified(pool: &PgPool, user_id: i64) -> bool {
    let verified = top_active_user_ids(pool).await.contains(&user_id);
    debug!("User {user_id} verification check: {verified}");
    verified
}

async fn compute_ranking(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
    let window = ranking::ActivityWindow::trailing_days(ACTIVITY_WINDOW_DAYS);
    let listings = signals::listing_counts(pool, &window).await?;
    let reviews = signals::review_counts(pool, &window).await?;
    let appointments = signals::appointment_tallies(pool, &window).await?;
    let favorites = signals::favorite_counts(pool).await?;

    let counts = ranking::merge_counts(listings, reviews, appointments, favorites);
    Ok(ranking::rank_active_users(&counts))
}
