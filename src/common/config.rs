// src/common/config.rs
//! Process-wide configuration loaded once at startup

use chrono::Duration;
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Signing secret used when running outside production without `SECRET_KEY`.
const DEVELOPMENT_SECRET: &str = "development-only-secret-change-me";

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:8000,http://127.0.0.1:3000,http://127.0.0.1:8000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SECRET_KEY must be set to a non-empty value in production")]
    MissingSecret,

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Invalid ACCESS_TOKEN_EXPIRE_MINUTES: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::to_lowercase).as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Token signing settings consumed by the token service
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub database_url: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub reset_db: bool,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("APP_ENV"));

        let secret = match lookup("SECRET_KEY").filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None if environment == Environment::Production => {
                return Err(ConfigError::MissingSecret)
            }
            None => {
                warn!("SECRET_KEY not set - using the development signing secret");
                DEVELOPMENT_SECRET.to_string()
            }
        };

        let algorithm_raw = lookup("ALGORITHM").unwrap_or_else(|| "HS256".to_string());
        let algorithm = match Algorithm::from_str(algorithm_raw.trim()) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(ConfigError::UnsupportedAlgorithm(algorithm_raw)),
        };

        let ttl_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => return Err(ConfigError::InvalidTokenTtl(raw)),
            },
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 8080,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            environment,
            app_name: lookup("APP_NAME").unwrap_or_else(|| "User Accounts API".to_string()),
            app_version: lookup("APP_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            debug: flag(lookup("DEBUG")),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://user_accounts.db".to_string()),
            port,
            cors_origins,
            reset_db: flag(lookup("RESET_DB")),
            auth: AuthConfig {
                secret,
                algorithm,
                access_token_ttl: Duration::minutes(ttl_minutes),
            },
        })
    }
}

fn flag(raw: Option<String>) -> bool {
    raw.map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.auth.secret, DEVELOPMENT_SECRET);
        assert_eq!(config.auth.algorithm, Algorithm::HS256);
        assert_eq!(config.auth.access_token_ttl, Duration::minutes(30));
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 4);
        assert!(!config.reset_db);
    }

    #[test]
    fn test_production_requires_secret() {
        assert_eq!(
            load(&[("APP_ENV", "production")]).unwrap_err(),
            ConfigError::MissingSecret
        );
        assert_eq!(
            load(&[("APP_ENV", "production"), ("SECRET_KEY", "   ")]).unwrap_err(),
            ConfigError::MissingSecret
        );

        let config = load(&[("APP_ENV", "production"), ("SECRET_KEY", "s3cr3t")]).unwrap();
        assert_eq!(config.auth.secret, "s3cr3t");
    }

    #[test]
    fn test_only_hmac_algorithms_accepted() {
        let config = load(&[("ALGORITHM", "HS512")]).unwrap();
        assert_eq!(config.auth.algorithm, Algorithm::HS512);

        assert!(matches!(
            load(&[("ALGORITHM", "RS256")]),
            Err(ConfigError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            load(&[("ALGORITHM", "none")]),
            Err(ConfigError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_token_ttl_parsing() {
        let config = load(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "45")]).unwrap();
        assert_eq!(config.auth.access_token_ttl, Duration::minutes(45));

        assert!(load(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "0")]).is_err());
        assert!(load(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "soon")]).is_err());
    }

    #[test]
    fn test_debug_output_hides_secret() {
        let config = load(&[("SECRET_KEY", "do-not-print")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("do-not-print"));
    }
}
