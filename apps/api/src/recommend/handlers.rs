use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recommend::engine::ScoredCandidate;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub user_id: i64,
}

/// One recommended listing with its component scores.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    pub listing_id: i64,
    pub title: String,
    pub species: String,
    pub breed: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub cf_score: i64,
    pub liked_by_similar_users: i64,
    pub content_score: i64,
    pub final_score: i64,
}

impl From<ScoredCandidate> for RecommendationDto {
    fn from(c: ScoredCandidate) -> Self {
        RecommendationDto {
            listing_id: c.listing.listing_id,
            title: c.listing.title,
            species: c.listing.traits.species,
            breed: c.listing.traits.breed,
            location: c.listing.traits.located_name,
            created_at: c.listing.created_at,
            cf_score: c.cf_score,
            liked_by_similar_users: c.liked_by_similar_users,
            content_score: c.content_score,
            final_score: c.final_score,
        }
    }
}

/// GET /api/listings/recommendations?userId=...
///
/// Infallible by design: a scoring failure yields an empty list.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> Json<Vec<RecommendationDto>> {
    let ranked = crate::recommend::recommend_listings(&state.db, params.user_id).await;
    Json(ranked.into_iter().map(RecommendationDto::from).collect())
}
