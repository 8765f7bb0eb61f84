use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::ident::UserId;
use crate::listings;
use crate::models::listing::ListingRow;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::users::store;

/// GET /api/users
pub async fn handle_all_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    let users = store::all_users(&state.db).await?;
    info!("Retrieved {} users", users.len());
    Ok(Json(users))
}

/// GET /api/users/:user_id
pub async fn handle_user_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserRow>, AppError> {
    let user = store::find_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(user))
}

/// GET /api/users/username/:username
pub async fn handle_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserRow>, AppError> {
    let user = store::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))?;
    Ok(Json(user))
}

/// GET /api/admins
pub async fn handle_all_admins(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    let admins = store::all_admins(&state.db).await?;
    Ok(Json(admins))
}

/// GET /api/admins/:admin_id
pub async fn handle_admin_by_id(
    State(state): State<AppState>,
    Path(admin_id): Path<i64>,
) -> Result<Json<UserRow>, AppError> {
    if !store::is_admin(&state.db, admin_id).await? {
        return Err(AppError::NotFound(format!("Admin {admin_id} not found")));
    }
    let admin = store::find_user(&state.db, admin_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Admin {admin_id} not found")))?;
    Ok(Json(admin))
}

async fn require_admin(pool: &PgPool, user_id: i64) -> Result<(), AppError> {
    if store::is_admin(pool, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Admin privileges required".to_string(),
        ))
    }
}

/// GET /api/users/admin/all — every registered user, admins only.
pub async fn handle_admin_all_users(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<UserRow>>, AppError> {
    require_admin(&state.db, user_id).await?;
    let users = store::all_users(&state.db).await?;
    info!("Admin {user_id} listed {} users", users.len());
    Ok(Json(users))
}

/// GET /api/users/admin/listings — every listing regardless of status,
/// admins only.
pub async fn handle_admin_all_listings(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<ListingRow>>, AppError> {
    require_admin(&state.db, user_id).await?;
    let all = listings::store::all_listings(&state.db).await?;
    info!("Admin {user_id} listed {} listings", all.len());
    Ok(Json(all))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    pub is_blocked: bool,
}

/// PATCH /api/users/admin/:target_user_id/block — admins only.
pub async fn handle_block_user(
    State(state): State<AppState>,
    Path(target_user_id): Path<i64>,
    UserId(admin_id): UserId,
    Json(req): Json<BlockRequest>,
) -> Result<Json<UserRow>, AppError> {
    require_admin(&state.db, admin_id).await?;
    let updated = store::set_blocked(&state.db, target_user_id, req.is_blocked)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {target_user_id} not found")))?;
    info!(
        "Admin {admin_id} set is_blocked={} on user {target_user_id}",
        req.is_blocked
    );
    Ok(Json(updated))
}

/// DELETE /api/users/admin/:target_user_id — admins only.
pub async fn handle_admin_delete_user(
    State(state): State<AppState>,
    Path(target_user_id): Path<i64>,
    UserId(admin_id): UserId,
) -> Result<StatusCode, AppError> {
    require_admin(&state.db, admin_id).await?;
    if !store::delete_user(&state.db, target_user_id).await? {
        return Err(AppError::NotFound(format!(
            "User {target_user_id} not found"
        )));
    }
    info!("Admin {admin_id} deleted user {target_user_id}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_request_uses_camel_case() {
        let req: BlockRequest = serde_json::from_str(r#"{"isBlocked":true}"#).unwrap();
        assert!(req.is_blocked);

        let req: BlockRequest = serde_json::from_str(r#"{"isBlocked":false}"#).unwrap();
        assert!(!req.is_blocked);
    }

    #[test]
    fn test_block_request_rejects_snake_case() {
        assert!(serde_json::from_str::<BlockRequest>(r#"{"is_blocked":true}"#).is_err());
    }
}
