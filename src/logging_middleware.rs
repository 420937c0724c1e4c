// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode
//!
//! Attached only when `DEBUG=true`. JSON bodies are logged with credentials
//! redacted; other bodies are only reported by size since form logins carry
//! the password in clear. Bodies over the cap, or of unknown length, are
//! forwarded untouched and never buffered.

use axum::body::to_bytes;
use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{debug, enabled, Level};

use crate::common::helpers::redact_json;

/// Largest body buffered for logging
pub const MAX_LOGGED_BODY: usize = 1024 * 1024;

fn describe_body(bytes: &Bytes) -> String {
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(mut json) => {
            redact_json(&mut json);
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| "<unprintable>".to_string())
        }
        Err(_) => format!("<{} bytes, not JSON>", bytes.len()),
    }
}

/// Whether the body has a known length small enough to buffer
fn fits_log_cap(body: &Body) -> bool {
    matches!(body.size_hint().upper(), Some(len) if len <= MAX_LOGGED_BODY as u64)
}

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let request = if fits_log_cap(request.body()) {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, MAX_LOGGED_BODY)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        if !bytes.is_empty() {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                request_body = %describe_body(&bytes),
                "📥 Request"
            );
        }
        Request::from_parts(parts, Body::from(bytes))
    } else {
        debug!(
            method = %request.method(),
            uri = %request.uri(),
            request_body = "<body too large>",
            "📥 Request"
        );
        request
    };

    let response = next.run(request).await;

    if !fits_log_cap(response.body()) {
        debug!(
            status = %response.status(),
            response_body = "<body too large>",
            "📤 Response"
        );
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            status = %parts.status,
            response_body = %describe_body(&bytes),
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::post, Router};
    use tower::ServiceExt;

    fn echo_app() -> Router {
        async fn echo(body: Bytes) -> Vec<u8> {
            body.to_vec()
        }

        Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(log_request_response))
    }

    async fn post_echo(body: Vec<u8>) -> (StatusCode, usize) {
        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from(body))
            .unwrap();
        let response = echo_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.len())
    }

    #[test]
    fn test_describe_body_redacts_credentials() {
        let body = Bytes::from_static(br#"{"email":"a@x.com","password":"Secret123"}"#);
        let described = describe_body(&body);

        assert!(described.contains("a@x.com"));
        assert!(!described.contains("Secret123"));
    }

    #[test]
    fn test_describe_body_hides_form_data() {
        let body = Bytes::from_static(b"username=a%40x.com&password=Secret123");
        let described = describe_body(&body);

        assert!(!described.contains("Secret123"));
        assert!(described.contains("not JSON"));
    }

    #[tokio::test]
    async fn test_oversized_bodies_pass_through_at_debug_level() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        assert!(enabled!(Level::DEBUG));

        let (status, len) = post_echo(vec![b'x'; MAX_LOGGED_BODY + 1]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(len, MAX_LOGGED_BODY + 1);

        let (status, len) = post_echo(br#"{"password":"Secret123"}"#.to_vec()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(len, 24);
    }
}
