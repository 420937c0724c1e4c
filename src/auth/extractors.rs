//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::common::{safe_email_log, ApiError, AppState};
use crate::users::User;

/// Authenticated user extractor
///
/// Runs the bearer-token gate and yields the current user record. Any
/// rejection becomes the generic `401`; lookup failures become `500`.
#[derive(Debug)]
pub struct AuthedUser(pub User);

impl AuthedUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state): Extension<AppState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        // A header that is not valid visible ASCII counts as absent.
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = app_state.auth.authenticate_request(authorization).await?;

        debug!(
            user_id = %user.id,
            email = %safe_email_log(&user.email),
            "User authentication successful via extractor"
        );

        Ok(AuthedUser(user))
    }
}
