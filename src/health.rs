//! Liveness and database health endpoints

use axum::{extract::Extension, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::error;

use crate::common::AppState;

pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

/// GET /
async fn root(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({ "message": format!("{} is running", state.config.app_name) }))
}

/// GET /health
/// Reports whether the database answers a trivial query
async fn health_check(Extension(state): Extension<AppState>) -> Json<Value> {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => Json(json!({
            "status": "healthy",
            "database": "connected",
            "app_name": state.config.app_name,
            "version": state.config.app_version,
        })),
        Err(e) => {
            error!(error = %e, "Health check database query failed");
            Json(json!({
                "status": "unhealthy",
                "database": "disconnected",
            }))
        }
    }
}
