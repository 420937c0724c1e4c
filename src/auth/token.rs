//! Signed, expiring bearer tokens
//!
//! Tokens are compact JWS strings (`header.claims.signature`, base64url)
//! signed with a server-held HMAC secret. Validation checks the signature
//! before any claim is read and then checks expiry against the injected clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::common::AuthConfig;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Identity facts the caller asks to embed in a token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityClaims {
    /// Subject: the account e-mail
    pub sub: Option<String>,
    pub user_id: Option<String>,
}

impl IdentityClaims {
    pub fn new(email: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            sub: Some(email.into()),
            user_id: Some(user_id.into()),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Unique per issued token
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a presented token was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenService {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            algorithm: config.algorithm,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            default_ttl: config.access_token_ttl,
            clock,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign `identity` into a token that expires `ttl` from now
    ///
    /// `None` uses the configured default lifetime.
    pub fn issue(
        &self,
        identity: &IdentityClaims,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError> {
        let now = self.clock.now();
        let expires_at = now + ttl.unwrap_or(self.default_ttl);

        let claims = Claims {
            sub: identity.sub.clone(),
            user_id: identity.user_id.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(
            &Header::new(self.algorithm),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenRejection> {
        if token.split('.').count() != 3 {
            return Err(TokenRejection::Malformed);
        }

        // Expiry is checked below against our clock, not the library's.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenRejection::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => TokenRejection::Malformed,
            })?;

        // `exp` is whole seconds; compare against the exact current instant.
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenRejection::Malformed)?;
        if self.clock.now() > expires_at {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}
