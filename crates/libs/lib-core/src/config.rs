//! # Application Configuration
//!
//! Configuration loaded once from environment variables at process start. Nothing is
//! hot-reloaded. Validation runs before anything serves traffic, so a missing or weak
//! signing key aborts startup.
//!
//! | variable | default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite:data/identity.db` |
//! | `TOKEN_KEY` | required, at least 64 bytes |
//! | `TOKEN_TTL_HOURS` | `168` (7 days) |
//! | `PASSWORD_MIN_LENGTH` | `1` |
//! | `LOG_LEVEL` | `info` |

use crate::error::{AppError, Result};
use chrono::Duration;
use lib_auth::token::MIN_KEY_LEN;
use lib_auth::{PwdPolicy, SigningKey};
use lib_utils::envs::{get_env, get_env_or, get_env_parse_or};
use std::fmt;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/identity.db";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 7 * 24;
pub const MAX_TOKEN_TTL_HOURS: i64 = 720;
pub const MAX_PASSWORD_MIN_LENGTH: usize = 128;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret for token signing and verification.
    ///
    /// **Must be at least 64 bytes long.** Never logged.
    pub token_key: String,

    /// Token validity period in hours.
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub token_ttl_hours: i64,

    /// Minimum password length accepted at registration (`0` allows empty passwords).
    pub password_min_length: usize,

    /// Log filter level
    pub log_level: String,
}

impl Config {
    /// Load and validate configuration from the environment.
    pub fn load() -> Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from environment variables without validating it.
    pub fn from_env() -> Result<Self> {
        let config_err = |e: lib_utils::envs::Error| AppError::Config(e.to_string());

        Ok(Self {
            database_url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            token_key: get_env("TOKEN_KEY").map_err(config_err)?,
            token_ttl_hours: get_env_parse_or("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)
                .map_err(config_err)?,
            password_min_length: get_env_parse_or("PASSWORD_MIN_LENGTH", 1).map_err(config_err)?,
            log_level: get_env_or("LOG_LEVEL", "info").to_lowercase(),
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.token_key.len() < MIN_KEY_LEN {
            return Err(AppError::Config(format!(
                "TOKEN_KEY must be at least {} bytes long (got {})",
                MIN_KEY_LEN,
                self.token_key.len()
            )));
        }

        if self.token_ttl_hours < 1 || self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::Config(format!(
                "TOKEN_TTL_HOURS must be between 1 and {} (30 days)",
                MAX_TOKEN_TTL_HOURS
            )));
        }

        if self.password_min_length > MAX_PASSWORD_MIN_LENGTH {
            return Err(AppError::Config(format!(
                "PASSWORD_MIN_LENGTH must be at most {}",
                MAX_PASSWORD_MIN_LENGTH
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(AppError::Config(format!(
                "LOG_LEVEL must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }

    pub fn pwd_policy(&self) -> PwdPolicy {
        PwdPolicy::new(self.password_min_length)
    }

    /// Build the signing key from `token_key`.
    pub fn signing_key(&self) -> Result<SigningKey> {
        Ok(SigningKey::new(self.token_key.as_bytes())?)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("token_key", &"[redacted]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("password_min_length", &self.password_min_length)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            token_key: "test-token-key-must-be-at-least-sixty-four-bytes-long-for-hs512-ok!".to_string(),
            token_ttl_hours: 24,
            password_min_length: 1,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = test_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.token_ttl(), Duration::hours(24));
        assert_eq!(config.pwd_policy(), PwdPolicy::new(1));
        assert!(config.signing_key().is_ok());
    }

    #[test]
    fn test_short_key_is_fatal() {
        let config = Config {
            token_key: "super secret key".to_string(),
            ..test_config()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("TOKEN_KEY"));
        assert!(matches!(config.signing_key(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_ttl_bounds() {
        for hours in [0, -1, MAX_TOKEN_TTL_HOURS + 1] {
            let config = Config {
                token_ttl_hours: hours,
                ..test_config()
            };
            assert!(config.validate().is_err(), "{hours}h should be rejected");
        }
    }

    #[test]
    fn test_unknown_log_level() {
        let config = Config {
            log_level: "verbose".to_string(),
            ..test_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", test_config());
        assert!(rendered.contains("[redacted]"));
        assert!(!rendered.contains("sixty-four"));
    }
}
