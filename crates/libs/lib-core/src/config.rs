//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is passed by value into the web layer's shared state;
//! there is no global instance.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env()?;
//! config.validate()?;
//! println!("listening on {}", config.bind_address());
//! # Ok::<(), String>(())
//! ```

use lib_utils::{get_env, get_env_or, get_env_parse_or, validate_email, validate_length};

/// Minimum and maximum password length accepted anywhere in the service.
pub const PASSWORD_MIN_LEN: usize = 3;
pub const PASSWORD_MAX_LEN: usize = 72;

/// Database used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/app.db";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// Access token validity period in minutes
    ///
    /// Valid range: 1-43200 minutes (1 minute to 30 days)
    pub access_token_expire_minutes: i64,

    /// Interface the HTTP listener binds to
    pub host: String,

    /// Port the HTTP listener binds to
    pub port: u16,

    /// Log filter level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Email of the administrator account created by the seed step
    pub admin_email: String,

    /// Password of the administrator account created by the seed step
    pub admin_password: String,

    /// Whether the seed step also creates demo `user` and `manager` accounts
    pub seed_demo_users: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| e.to_string())?;

        let access_token_expire_minutes =
            get_env_parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", 30).map_err(|e| e.to_string())?;

        let host = get_env_or("APP_HOST", "0.0.0.0");
        let port = get_env_parse_or("APP_PORT", 8000).map_err(|e| e.to_string())?;

        let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

        let admin_email = get_env_or("ADMIN_EMAIL", "admin@admin.com");
        let admin_password = get_env_or("ADMIN_PASSWORD", "admin");
        let seed_demo_users = get_env_parse_or("SEED_DEMO_USERS", false).map_err(|e| e.to_string())?;

        Ok(Self {
            database_url,
            jwt_secret,
            access_token_expire_minutes,
            host,
            port,
            log_level,
            admin_email,
            admin_password,
            seed_demo_users,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.access_token_expire_minutes < 1 || self.access_token_expire_minutes > 43_200 {
            return Err("ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and 43200 (30 days)".to_string());
        }

        validate_email(&self.admin_email).map_err(|e| format!("ADMIN_EMAIL: {}", e))?;
        validate_length(&self.admin_password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN, "ADMIN_PASSWORD")?;

        Ok(())
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuration suitable for tests: in-memory database, fixed secret.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
            access_token_expire_minutes: 30,
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "debug".to_string(),
            admin_email: "admin@admin.com".to_string(),
            admin_password: "admin".to_string(),
            seed_demo_users: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(Config::for_tests().validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = Config {
            jwt_secret: "too-short".to_string(),
            ..Config::for_tests()
        };
        assert_eq!(
            config.validate(),
            Err("JWT_SECRET must be at least 32 characters long".to_string())
        );
    }

    #[test]
    fn test_expiry_out_of_range() {
        let config = Config {
            access_token_expire_minutes: 0,
            ..Config::for_tests()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_admin_email_rejected() {
        let config = Config {
            admin_email: "admin".to_string(),
            ..Config::for_tests()
        };
        assert!(config.validate().unwrap_err().starts_with("ADMIN_EMAIL"));
    }

    #[test]
    fn test_bind_address_defaults() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 8000,
            ..Config::for_tests()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }
}
