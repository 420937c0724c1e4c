//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /auth/register` - Create an account and receive a token
/// - `POST /auth/login` - OAuth2 password form login
/// - `POST /auth/login-json` - JSON login
/// - `GET /auth/me` - Get current user information
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login_form))
        .route("/auth/login-json", post(handlers::login_json))
        .route("/auth/me", get(handlers::me_handler))
}
