//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (with `.env` support)
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use wpos_expenses::config::{Config, DEFAULT_DATABASE_PATH};
//!
//! // Use Config::from_env() in production
//! let config = Config {
//!     database_path: DEFAULT_DATABASE_PATH.to_string(),
//!     log_level: "info".to_string(),
//!     max_connections: 5,
//! };
//!
//! assert!(wpos_expenses::config::validate_config(&config).is_ok());
//! ```

mod validation;

pub use validation::{validate_config, MAX_CONNECTIONS};

use crate::error::ConfigError;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/expenses.db";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default connection pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the `SQLite` database file.
    pub database_path: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to `SQLite` database (default: `./data/expenses.db`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `DB_MAX_CONNECTIONS`: Pool size (default: `5`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `DATABASE_PATH` is set but empty
    /// - `DB_MAX_CONNECTIONS` is not a valid positive integer or out of range
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let max_connections = parse_env_u32("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let config = Self {
            database_path,
            log_level,
            max_connections,
        };

        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse an environment variable as u32, using a default if not set.
fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to set up a clean test environment.
    fn setup_test_env() {
        env::remove_var("DATABASE_PATH");
        env::remove_var("LOG_LEVEL");
        env::remove_var("DB_MAX_CONNECTIONS");
    }

    #[test]
    #[serial]
    fn test_config_from_env_with_all_vars() {
        setup_test_env();

        env::set_var("DATABASE_PATH", "/custom/expenses.db");
        env::set_var("LOG_LEVEL", "debug");
        env::set_var("DB_MAX_CONNECTIONS", "8");

        let config = Config::from_env().expect("should load config");

        assert_eq!(config.database_path, "/custom/expenses.db");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_connections, 8);

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        setup_test_env();

        let config = Config::from_env().expect("should load config");

        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_config_invalid_max_connections_format() {
        setup_test_env();
        env::set_var("DB_MAX_CONNECTIONS", "lots");

        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { var, .. }) if var == "DB_MAX_CONNECTIONS"
        ));

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_max_connections_out_of_range() {
        setup_test_env();
        env::set_var("DB_MAX_CONNECTIONS", "0");

        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { var, .. }) if var == "DB_MAX_CONNECTIONS"
        ));

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_empty_database_path() {
        setup_test_env();
        env::set_var("DATABASE_PATH", "");

        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { var, .. }) if var == "DATABASE_PATH"
        ));

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_parse_env_u32_with_value() {
        env::set_var("TEST_EXPENSES_U32", "42");
        let result = parse_env_u32("TEST_EXPENSES_U32", 0);
        assert_eq!(result.unwrap(), 42);
        env::remove_var("TEST_EXPENSES_U32");
    }

    #[test]
    #[serial]
    fn test_parse_env_u32_default() {
        env::remove_var("TEST_EXPENSES_U32_MISSING");
        let result = parse_env_u32("TEST_EXPENSES_U32_MISSING", 100);
        assert_eq!(result.unwrap(), 100);
    }
}
