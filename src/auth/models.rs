//! Authentication request and response models

use serde::{Deserialize, Serialize};

use crate::users::UserResponse;

pub const TOKEN_TYPE: &str = "bearer";

/// JSON login body
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// OAuth2 password-grant form (`username` carries the e-mail)
///
/// `grant_type`, `scope` and client fields are accepted and ignored.
#[derive(Deserialize, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}

/// Registration result: the new user plus a ready-to-use token
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
}
