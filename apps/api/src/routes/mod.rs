pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::favorites;
use crate::listings;
use crate::pets;
use crate::recommend;
use crate::reviews;
use crate::state::AppState;
use crate::users;
use crate::verification;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Listings
        .route("/api/listings", post(listings::handlers::handle_create_listing))
        .route(
            "/api/listings/active",
            get(listings::handlers::handle_active_listings),
        )
        .route(
            "/api/listings/my-listings",
            get(listings::handlers::handle_my_listings),
        )
        .route(
            "/api/listings/recommendations",
            get(recommend::handlers::handle_recommendations),
        )
        .route(
            "/api/listings/:listing_id",
            get(listings::handlers::handle_get_listing)
                .delete(listings::handlers::handle_delete_listing),
        )
        .route(
            "/api/listings/:listing_id/status",
            patch(listings::handlers::handle_update_status),
        )
        // Favorites
        .route(
            "/api/favorites",
            get(favorites::handlers::handle_list_favorites),
        )
        .route(
            "/api/favorites/:listing_id",
            post(favorites::handlers::handle_add_favorite)
                .delete(favorites::handlers::handle_remove_favorite),
        )
        .route(
            "/api/favorites/:listing_id/is-favorited",
            get(favorites::handlers::handle_is_favorited),
        )
        // Reviews — the capture is the target user for POST/GET and the
        // review id for DELETE, mirroring the public API contract.
        .route(
            "/api/reviews/:id",
            post(reviews::handlers::handle_create_review)
                .get(reviews::handlers::handle_reviews_for_user)
                .delete(reviews::handlers::handle_delete_review),
        )
        // Users & verification
        .route("/api/users", get(users::handlers::handle_all_users))
        .route("/api/admins", get(users::handlers::handle_all_admins))
        .route(
            "/api/admins/:admin_id",
            get(users::handlers::handle_admin_by_id),
        )
        // Admin moderation
        .route(
            "/api/users/admin/all",
            get(users::handlers::handle_admin_all_users),
        )
        .route(
            "/api/users/admin/listings",
            get(users::handlers::handle_admin_all_listings),
        )
        .route(
            "/api/users/admin/:target_user_id",
            delete(users::handlers::handle_admin_delete_user),
        )
        .route(
            "/api/users/admin/:target_user_id/block",
            patch(users::handlers::handle_block_user),
        )
        .route(
            "/api/users/username/:username",
            get(users::handlers::handle_user_by_username),
        )
        .route(
            "/api/users/verification/top-10",
            get(verification::handlers::handle_top_active_users),
        )
        .route("/api/users/:user_id", get(users::handlers::handle_user_by_id))
        .route(
            "/api/users/:user_id/verified",
            get(verification::handlers::handle_is_verified),
        )
        .route(
            "/api/users/:user_id/pets",
            get(pets::handlers::handle_user_pets).post(pets::handlers::handle_create_pet),
        )
        .with_state(state)
}
