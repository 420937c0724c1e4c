//! Authentication handlers

use axum::{
    extract::{Extension, Form, Json},
    http::StatusCode,
};
use tracing::{info, warn};

use super::extractors::AuthedUser;
use super::models::{LoginForm, LoginRequest, RegisterResponse, TokenResponse, TOKEN_TYPE};
use crate::common::{safe_email_log, ApiError, AppState};
use crate::users::handlers::create_account;
use crate::users::models::CreateUserRequest;
use crate::users::validators::normalize_email;
use crate::users::UserResponse;

/// POST /auth/register
/// Creates an account and returns it together with an access token
///
/// # Request Body
/// ```json
/// { "email": "a@x.com", "name": "Alice", "password": "Secret123" }
/// ```
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    info!(email = %safe_email_log(&payload.email), "🔐 Received registration request");

    let user = create_account(&state, payload).await?;
    let access_token = state.auth.issue_token_for(&user)?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            access_token,
            token_type: TOKEN_TYPE.to_string(),
        }),
    ))
}

/// Shared login flow for the form and JSON variants
async fn login(state: &AppState, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
    let email = normalize_email(email);

    let user = match state.auth.authenticate_credentials(&email, password).await? {
        Some(user) => user,
        None => {
            warn!(email = %safe_email_log(&email), "Login failed");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let access_token = state.auth.issue_token_for(&user)?;
    info!(user_id = %user.id, "User logged in");

    Ok(TokenResponse::bearer(
        access_token,
        state.auth.token_ttl().num_seconds(),
    ))
}

/// POST /auth/login
/// OAuth2 password form (`username`, `password`)
pub async fn login_form(
    Extension(state): Extension<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    Ok(Json(login(&state, &form.username, &form.password).await?))
}

/// POST /auth/login-json
/// JSON login (`email`, `password`)
pub async fn login_json(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    Ok(Json(login(&state, &payload.email, &payload.password).await?))
}

/// GET /auth/me
/// Returns the user behind the presented token
pub async fn me_handler(authed: AuthedUser) -> Json<UserResponse> {
    Json(authed.into_inner().into())
}
