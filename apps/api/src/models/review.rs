use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A review row joined with its target-user link. Deletion is soft: the row
/// stays, `is_deleted` flips, and the (reviewer, target) pair becomes free
/// for a new review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRow {
    pub review_id: i64,
    pub reviewer_id: i64,
    pub target_user_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}
