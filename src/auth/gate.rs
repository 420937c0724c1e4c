//! Bearer-token gate for protected requests

use std::sync::Arc;
use tracing::debug;

use super::errors::{AuthError, UnauthorizedReason};
use super::lookup::UserLookup;
use super::token::TokenService;
use crate::common::{safe_email_log, safe_token_log};
use crate::users::User;

/// Resolves an `Authorization` header to the current user record
pub struct AuthorizationGate {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserLookup>,
}

impl AuthorizationGate {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserLookup>) -> Self {
        Self { tokens, users }
    }

    /// Validate the bearer token and load the user it names
    ///
    /// The returned user is read from the store on every call, so profile
    /// changes show up immediately and deleted accounts stop authenticating.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        let header =
            authorization.ok_or(AuthError::Unauthorized(UnauthorizedReason::MissingHeader))?;

        let token = bearer_token(header)
            .ok_or(AuthError::Unauthorized(UnauthorizedReason::InvalidScheme))?;

        let claims = self
            .tokens
            .validate(token)
            .map_err(|rejection| {
                debug!(token = %safe_token_log(token), reason = %rejection, "Bearer token rejected");
                AuthError::Unauthorized(UnauthorizedReason::Token(rejection))
            })?;

        let email = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(AuthError::Unauthorized(UnauthorizedReason::MissingSubject))?;

        let user = self
            .users
            .by_email(&email)
            .await?
            .ok_or(AuthError::Unauthorized(UnauthorizedReason::UnknownUser))?;

        debug!(
            user_id = %user.id,
            email = %safe_email_log(&user.email),
            "Bearer token resolved to user"
        );

        self.ensure_active(user)
    }

    /// Hook for suspension/ban checks; every account is active today
    pub fn ensure_active(&self, user: User) -> Result<User, AuthError> {
        Ok(user)
    }
}

/// Extract `<token>` from `Bearer <token>`; the scheme is case-insensitive
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() || token.contains(' ') {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::lookup::test_support::{sample_user, FailingLookup, MemoryLookup};
    use crate::auth::token::test_support::test_auth_config;
    use crate::auth::token::{IdentityClaims, SystemClock, TokenRejection};
    use chrono::Duration;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            &test_auth_config("gate_secret"),
            Arc::new(SystemClock),
        ))
    }

    fn reason(err: AuthError) -> UnauthorizedReason {
        match err {
            AuthError::Unauthorized(reason) => reason,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("  Bearer   abc  "), Some("abc"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
        assert_eq!(bearer_token("Bearer a b"), None);
    }

    #[tokio::test]
    async fn test_valid_token_resolves_current_record() {
        let users = Arc::new(MemoryLookup::default());
        users.insert(sample_user("u-1", "a@x.com", "Alice"));
        let tokens = tokens();
        let gate = AuthorizationGate::new(tokens.clone(), users.clone());

        let token = tokens
            .issue(&IdentityClaims::new("a@x.com", "u-1"), None)
            .unwrap();

        // Rename after issuance: the gate reports the stored record.
        users.insert(sample_user("u-1", "a@x.com", "Alice Renamed"));

        let user = gate
            .authenticate(Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.name, "Alice Renamed");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_headers() {
        let gate = AuthorizationGate::new(tokens(), Arc::new(MemoryLookup::default()));

        assert_eq!(
            reason(gate.authenticate(None).await.unwrap_err()),
            UnauthorizedReason::MissingHeader
        );
        assert_eq!(
            reason(gate.authenticate(Some("Token abc")).await.unwrap_err()),
            UnauthorizedReason::InvalidScheme
        );
        assert_eq!(
            reason(gate.authenticate(Some("Bearer not-a-jwt")).await.unwrap_err()),
            UnauthorizedReason::Token(TokenRejection::Malformed)
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let users = Arc::new(MemoryLookup::default());
        users.insert(sample_user("u-1", "a@x.com", "Alice"));
        let tokens = tokens();
        let gate = AuthorizationGate::new(tokens.clone(), users);

        let token = tokens
            .issue(
                &IdentityClaims::new("a@x.com", "u-1"),
                Some(Duration::seconds(-1)),
            )
            .unwrap();

        let err = gate
            .authenticate(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert_eq!(
            reason(err),
            UnauthorizedReason::Token(TokenRejection::Expired)
        );
    }

    #[tokio::test]
    async fn test_missing_subject_is_rejected() {
        let tokens = tokens();
        let gate = AuthorizationGate::new(tokens.clone(), Arc::new(MemoryLookup::default()));

        let token = tokens
            .issue(
                &IdentityClaims {
                    sub: None,
                    user_id: Some("u-1".to_string()),
                },
                None,
            )
            .unwrap();

        let err = gate
            .authenticate(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert_eq!(reason(err), UnauthorizedReason::MissingSubject);
    }

    #[tokio::test]
    async fn test_deleted_user_is_rejected() {
        let users = Arc::new(MemoryLookup::default());
        users.insert(sample_user("u-1", "a@x.com", "Alice"));
        let tokens = tokens();
        let gate = AuthorizationGate::new(tokens.clone(), users.clone());

        let header = format!(
            "Bearer {}",
            tokens
                .issue(&IdentityClaims::new("a@x.com", "u-1"), None)
                .unwrap()
        );
        assert!(gate.authenticate(Some(&header)).await.is_ok());

        users.remove("a@x.com");
        let err = gate.authenticate(Some(&header)).await.unwrap_err();
        assert_eq!(reason(err), UnauthorizedReason::UnknownUser);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_a_rejection() {
        let tokens = tokens();
        let gate = AuthorizationGate::new(tokens.clone(), Arc::new(FailingLookup));

        let token = tokens
            .issue(&IdentityClaims::new("a@x.com", "u-1"), None)
            .unwrap();

        let err = gate
            .authenticate(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Lookup(_)));
    }
}
