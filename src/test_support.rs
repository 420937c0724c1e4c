//! Shared fixtures for router-level tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::auth::password::cheap_hasher;
use crate::auth::token::SystemClock;
use crate::auth::{AuthService, UserLookup};
use crate::common::{AppConfig, AppState};
use crate::users::store::test_support::setup_test_db;
use crate::users::UserStore;

pub async fn test_state() -> AppState {
    build_test_state(&[], None).await
}

/// Test state with extra config keys and, optionally, a replacement for the
/// user lookup the auth core reads from
pub async fn build_test_state(
    settings: &[(&str, &str)],
    lookup: Option<Arc<dyn UserLookup>>,
) -> AppState {
    let pool = setup_test_db().await;
    let config = AppConfig::from_lookup(|key| match key {
        "SECRET_KEY" => Some("router-test-secret".to_string()),
        _ => settings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string()),
    })
    .expect("test config");

    let users = Arc::new(UserStore::new(pool.clone()));
    let lookup = lookup.unwrap_or_else(|| users.clone() as Arc<dyn UserLookup>);
    let auth = AuthService::from_parts(
        cheap_hasher(),
        &config.auth,
        Arc::new(SystemClock),
        lookup,
    )
    .expect("test auth service");

    AppState {
        db: pool,
        config: Arc::new(config),
        users,
        auth: Arc::new(auth),
    }
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (crate::build_router(state.clone()), state)
}

/// Send one request and return the status with the decoded JSON body
/// (`Value::Null` for empty bodies)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Register an account and return its access token
pub async fn register(app: &Router, email: &str, password: &str) -> (Value, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "name": "Test User",
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");

    let token = body["access_token"].as_str().unwrap().to_string();
    (body, token)
}
