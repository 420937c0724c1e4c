//! Authentication facade used by the route handlers

use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

use super::credentials::CredentialAuthenticator;
use super::errors::AuthError;
use super::gate::AuthorizationGate;
use super::lookup::UserLookup;
use super::password::{HashError, PasswordHasher};
use super::token::{Clock, IdentityClaims, SystemClock, TokenService};
use crate::common::AuthConfig;
use crate::users::User;

/// Password hashing, token minting and request authentication in one place
///
/// Built once at startup with the signing configuration and the user store;
/// shared read-only between requests.
pub struct AuthService {
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenService>,
    gate: AuthorizationGate,
    credentials: CredentialAuthenticator,
}

impl AuthService {
    pub fn new(config: &AuthConfig, users: Arc<dyn UserLookup>) -> Result<Self, HashError> {
        Self::from_parts(
            PasswordHasher::new(),
            config,
            Arc::new(SystemClock),
            users,
        )
    }

    pub fn from_parts(
        hasher: PasswordHasher,
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
        users: Arc<dyn UserLookup>,
    ) -> Result<Self, HashError> {
        let hasher = Arc::new(hasher);
        let tokens = Arc::new(TokenService::new(config, clock));

        Ok(Self {
            gate: AuthorizationGate::new(Arc::clone(&tokens), Arc::clone(&users)),
            credentials: CredentialAuthenticator::new(Arc::clone(&hasher), users)?,
            hasher,
            tokens,
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn token_ttl(&self) -> Duration {
        self.tokens().default_ttl()
    }

    /// Mint an access token for a user whose identity is already established
    pub fn issue_token_for(&self, user: &User) -> Result<String, AuthError> {
        let token = self
            .tokens
            .issue(&IdentityClaims::new(&user.email, &user.id), None)?;
        debug!(user_id = %user.id, "Access token issued");
        Ok(token)
    }

    /// Resolve the `Authorization` header of a request to its user
    pub async fn authenticate_request(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        self.gate.authenticate(authorization).await
    }

    /// Check login credentials; `None` for any mismatch
    pub async fn authenticate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        self.credentials.authenticate(email, password).await
    }

    /// Hash a new password off the async executor
    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
        Ok(hash)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::auth::password::cheap_hasher;
    use crate::auth::token::test_support::test_auth_config;

    pub fn test_auth_service(users: Arc<dyn UserLookup>) -> AuthService {
        AuthService::from_parts(
            cheap_hasher(),
            &test_auth_config("service_secret"),
            Arc::new(SystemClock),
            users,
        )
        .expect("test auth service")
    }
}
