use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::db;
use crate::state::AppState;

/// GET /health
/// Returns service status plus a database liveness flag.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let database = match db::ping(&state.db).await {
        Ok(()) => "up",
        Err(_) => "down",
    };
    Json(json!({
        "status": "ok",
        "service": "pawmart-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database
    }))
}
