//! E-mail + password login check

use std::sync::Arc;
use tracing::debug;

use super::errors::AuthError;
use super::lookup::UserLookup;
use super::password::{HashError, PasswordHasher};
use crate::common::safe_email_log;
use crate::users::User;

/// Verifies login credentials against the stored password hash
///
/// Unknown e-mails and wrong passwords both yield `Ok(None)`. An unknown
/// e-mail still pays for one hash verification against a placeholder hash so
/// response time does not reveal whether the account exists.
pub struct CredentialAuthenticator {
    hasher: Arc<PasswordHasher>,
    users: Arc<dyn UserLookup>,
    placeholder_hash: Arc<str>,
}

impl CredentialAuthenticator {
    pub fn new(hasher: Arc<PasswordHasher>, users: Arc<dyn UserLookup>) -> Result<Self, HashError> {
        let placeholder_hash = hasher.hash("placeholder-password-for-unknown-accounts")?;

        Ok(Self {
            hasher,
            users,
            placeholder_hash: placeholder_hash.into(),
        })
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let user = self.users.by_email(email).await?;

        let stored_hash = match &user {
            Some(u) => u.password_hash.clone(),
            None => self.placeholder_hash.to_string(),
        };
        let hasher = Arc::clone(&self.hasher);
        let candidate = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(&candidate, &stored_hash)).await?;

        match user {
            Some(u) if matches => Ok(Some(u)),
            Some(_) => {
                debug!(email = %safe_email_log(email), "Login rejected: password mismatch");
                Ok(None)
            }
            None => {
                debug!(email = %safe_email_log(email), "Login rejected: unknown account");
                Ok(None)
            }
        }
    }
}
