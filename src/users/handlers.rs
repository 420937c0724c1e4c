// src/users/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use super::models::{
    CreateUserRequest, ListUsersQuery, ReplaceUserRequest, UpdateUserRequest, User,
    UserChanges, UserResponse,
};
use super::store::StoreError;
use super::validators::{normalize_email, CreateUserValidator, UpdateUserValidator};
use crate::auth::AuthedUser;
use crate::common::{safe_email_log, ApiError, AppState, Validator};

const EMAIL_TAKEN: &str = "Email already registered";

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::BadRequest(EMAIL_TAKEN.to_string()),
            StoreError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

/// Validate, hash and store a new account
///
/// Shared by `POST /users` and `POST /auth/register`.
pub async fn create_account(state: &AppState, request: CreateUserRequest) -> Result<User, ApiError> {
    CreateUserValidator.validate(&request).into_result()?;

    let email = normalize_email(&request.email);
    if state.users.email_taken(&email, None).await? {
        warn!(email = %safe_email_log(&email), "Account creation rejected: email already registered");
        return Err(ApiError::BadRequest(EMAIL_TAKEN.to_string()));
    }

    let password_hash = state.auth.hash_password(&request.password).await?;
    let user = state
        .users
        .create(&email, request.name.trim(), &password_hash)
        .await?;

    Ok(user)
}

/// Reject mutations of any account other than the caller's own
fn ensure_owner(authed: &AuthedUser, target_id: &str) -> Result<(), ApiError> {
    if authed.id() != target_id {
        warn!(
            user_id = %authed.id(),
            target_user_id = %target_id,
            "User modification denied: not the account owner"
        );
        return Err(ApiError::Forbidden(
            "Not allowed to modify another user's account".to_string(),
        ));
    }
    Ok(())
}

async fn apply_update(
    state: &AppState,
    authed: &AuthedUser,
    user_id: &str,
    request: UpdateUserRequest,
) -> Result<UserResponse, ApiError> {
    ensure_owner(authed, user_id)?;
    UpdateUserValidator.validate(&request).into_result()?;

    let email = request.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        if state.users.email_taken(email, Some(user_id)).await? {
            return Err(ApiError::BadRequest(EMAIL_TAKEN.to_string()));
        }
    }

    let password_hash = match &request.password {
        Some(password) => Some(state.auth.hash_password(password).await?),
        None => None,
    };

    let changes = UserChanges {
        email,
        name: request.name.map(|n| n.trim().to_string()),
        password_hash,
    };

    let user = state
        .users
        .update(user_id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(user.into())
}

/// GET /users?skip=&limit= - List users
pub async fn list_users(
    Extension(state): Extension<AppState>,
    authed: AuthedUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let (skip, limit) = query.bounds();
    let users = state.users.list(skip, limit).await?;

    info!(
        user_id = %authed.id(),
        skip = skip,
        limit = limit,
        count = users.len(),
        "Users listed"
    );

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/:id - Get a single user
pub async fn get_user(
    Extension(state): Extension<AppState>,
    _authed: AuthedUser,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .get_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// POST /users - Create a user
pub async fn create_user(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = create_account(&state, request).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/:id - Replace name and e-mail (password optional)
pub async fn replace_user(
    Extension(state): Extension<AppState>,
    authed: AuthedUser,
    Path(user_id): Path<String>,
    Json(request): Json<ReplaceUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = apply_update(&state, &authed, &user_id, request.into()).await?;
    Ok(Json(user))
}

/// PATCH /users/:id - Partial update
pub async fn update_user(
    Extension(state): Extension<AppState>,
    authed: AuthedUser,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = apply_update(&state, &authed, &user_id, request).await?;
    Ok(Json(user))
}

/// DELETE /users/:id - Delete own account
pub async fn delete_user(
    Extension(state): Extension<AppState>,
    authed: AuthedUser,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    ensure_owner(&authed, &user_id)?;

    if !state.users.delete(&user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
