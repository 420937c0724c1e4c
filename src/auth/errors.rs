//! Authentication error types
//!
//! Rejections carry a reason for the logs only. At the HTTP boundary every
//! rejection collapses into the same `401` body.

use thiserror::Error;
use tracing::warn;

use super::password::HashError;
use super::token::{TokenError, TokenRejection};
use crate::common::ApiError;

/// Internal reason a request could not be authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    MissingHeader,
    InvalidScheme,
    Token(TokenRejection),
    MissingSubject,
    UnknownUser,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not validate credentials: {0:?}")]
    Unauthorized(UnauthorizedReason),

    #[error("User lookup failed: {0}")]
    Lookup(#[from] sqlx::Error),

    #[error(transparent)]
    Hashing(#[from] HashError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Background hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized(reason) => {
                warn!(reason = ?reason, "Request authentication rejected");
                ApiError::Unauthorized
            }
            AuthError::Lookup(e) => ApiError::DatabaseError(e),
            other => ApiError::InternalServer(other.to_string()),
        }
    }
}
