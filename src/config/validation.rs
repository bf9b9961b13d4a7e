//! Configuration validation.

use super::Config;
use crate::error::ConfigError;

/// Maximum allowed pool size.
pub const MAX_CONNECTIONS: u32 = 32;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DATABASE_PATH` must not be empty
/// - `DB_MAX_CONNECTIONS` must be between 1 and 32
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DATABASE_PATH".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.max_connections == 0 || config.max_connections > MAX_CONNECTIONS {
        return Err(ConfigError::InvalidValue {
            var: "DB_MAX_CONNECTIONS".into(),
            reason: format!("must be between 1 and {MAX_CONNECTIONS}"),
        });
    }

    Ok(())
}
