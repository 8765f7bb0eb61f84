//! User lookups and role-table membership checks. A user is an
//! admin/owner/client by virtue of a row in the corresponding role table.

use sqlx::PgPool;

use crate::models::user::UserRow;

pub async fn find_user(pool: &PgPool, user_id: i64) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn all_users(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY user_id")
        .fetch_all(pool)
        .await
}

pub async fn is_owner(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM owners WHERE user_id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn is_client(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE user_id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn is_admin(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins WHERE user_id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn all_admins(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT u.*
        FROM users u
        JOIN admins a ON a.user_id = u.user_id
        ORDER BY u.user_id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Sets the moderation flag, returning the updated row (None for unknown ids).
pub async fn set_blocked(
    pool: &PgPool,
    user_id: i64,
    blocked: bool,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("UPDATE users SET is_blocked = $2 WHERE user_id = $1 RETURNING *")
        .bind(user_id)
        .bind(blocked)
        .fetch_optional(pool)
        .await
}

/// Removes the user; role rows, pets, listings, favorites, reviews and
/// appointments follow via ON DELETE CASCADE. Returns false when no such
/// user exists.
pub async fn delete_user(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Grants the owner role if the user doesn't have it yet (a client adding
/// their first pet becomes an owner).
pub async fn ensure_owner(pool: &PgPool, user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO owners (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await
        .map(|_| ())
}
