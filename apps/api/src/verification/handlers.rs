use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/users/verification/top-10
pub async fn handle_top_active_users(State(state): State<AppState>) -> Json<Value> {
    let top_users = crate::verification::top_active_user_ids(&state.db).await;
    Json(json!({
        "topUsers": top_users,
        "count": top_users.len()
    }))
}

/// GET /api/users/:user_id/verified
pub async fn handle_is_verified(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<Value> {
    let verified = crate::verification::is_user_verified(&state.db, user_id).await;
    Json(json!({
        "userId": user_id,
        "verified": verified
    }))
}
