//! User data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model
#[derive(FromRow, Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Public representation of a user; never carries the password hash
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body of `POST /users` and `POST /auth/register`
#[derive(Deserialize, Debug)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Body of `PUT /users/:id`: name and e-mail replaced, password optional
#[derive(Deserialize, Debug)]
pub struct ReplaceUserRequest {
    pub email: String,
    pub name: String,
    pub password: Option<String>,
}

/// Body of `PATCH /users/:id`: only the present fields change
#[derive(Deserialize, Debug, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl From<ReplaceUserRequest> for UpdateUserRequest {
    fn from(request: ReplaceUserRequest) -> Self {
        Self {
            email: Some(request.email),
            name: Some(request.name),
            password: request.password,
        }
    }
}

/// Pagination for `GET /users`
#[derive(Deserialize, Debug)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub const MAX_PAGE_SIZE: i64 = 100;

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

impl ListUsersQuery {
    /// Offset and limit clamped to sane bounds
    pub fn bounds(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.clamp(1, MAX_PAGE_SIZE))
    }
}

/// Store-level changes with the password already hashed
#[derive(Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.password_hash.is_none()
    }
}
