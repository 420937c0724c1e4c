//! User management routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the user management router
///
/// # Routes
/// - `GET /users` - List users (authenticated)
/// - `POST /users` - Create a user
/// - `GET /users/:id` - Get a user (authenticated)
/// - `PUT /users/:id` - Replace own account
/// - `PATCH /users/:id` - Partially update own account
/// - `DELETE /users/:id` - Delete own account
pub fn users_routes() -> Router {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::replace_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
}
