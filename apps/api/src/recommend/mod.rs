pub mod engine;
pub mod handlers;
pub mod signals;

use std::collections::HashSet;

use sqlx::PgPool;
use tracing::{error, info};

use crate::recommend::engine::ScoredCandidate;

/// Ranked recommendations for a user, at most
/// [`engine::MAX_RECOMMENDATIONS`] entries.
///
/// Recommendations are advisory: any query or computation failure degrades to
/// an empty list instead of surfacing an error to the caller.
pub async fn recommend_listings(pool: &PgPool, user_id: i64) -> Vec<ScoredCandidate> {
    match compute_recommendations(pool, user_id).await {
        Ok(ranked) => {
            info!("Computed {} recommendations for user {user_id}", ranked.len());
            ranked
        }
        Err(e) => {
            error!("Recommendation computation failed for user {user_id}: {e}");
            Vec::new()
        }
    }
}

async fn compute_recommendations(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<ScoredCandidate>, sqlx::Error> {
    let my_likes = signals::liked_listings(pool, user_id).await?;
    if my_likes.is_empty() {
        // No taste signal at all: both branches are empty by construction.
        return Ok(Vec::new());
    }
    let my_like_ids: HashSet<i64> = my_likes.iter().map(|l| l.listing_id).collect();
    let liked_ids: Vec<i64> = my_like_ids.iter().copied().collect();

    let recent = engine::recent_likes(&my_likes);

    let co_favorites = signals::co_favorites(pool, user_id, &liked_ids).await?;
    let overlap = engine::similar_users(user_id, &co_favorites, &my_like_ids);

    let similar_ids: Vec<i64> = overlap.keys().copied().collect();
    let similar_favorites = if similar_ids.is_empty() {
        Vec::new()
    } else {
        signals::favorites_of_users(pool, &similar_ids).await?
    };
    let cf = engine::cf_signals(&overlap, &similar_favorites, &my_like_ids);

    let candidates = signals::eligible_candidates(pool, user_id).await?;
    let content = engine::content_scores(&recent, &candidates);

    Ok(engine::merge_and_rank(candidates, &cf, &content))
}
