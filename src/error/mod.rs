//! Error types for the expense item data-access layer.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`StorageError`]: Store and repository errors
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// Wraps all subsystem errors for unified error handling in the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command-line parsing error.
    #[error("Usage error: {0}")]
    Cli(#[from] crate::cli::CommandParseError),
}

/// Storage errors.
///
/// `UniqueConflict` and `InvalidInput` are distinguishable outcomes callers
/// are expected to match on; every other variant is a generic store failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to connect to the database.
    #[error("Database connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure.
        message: String,
    },

    /// A database query failed.
    #[error("Query failed: {query} - {message}")]
    QueryFailed {
        /// Label of the statement that failed.
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// A write violated a uniqueness constraint.
    #[error("Unique constraint violated: {query} - {message}")]
    UniqueConflict {
        /// Label of the statement that failed.
        query: String,
        /// Driver message naming the constraint.
        message: String,
    },

    /// Caller supplied a value of the wrong shape. No statement was issued.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// The offending argument.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Database migration failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },

    /// Internal storage error.
    #[error("Internal storage error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Build an [`StorageError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for the uniqueness-conflict sentinel.
    #[must_use]
    pub const fn is_unique_conflict(&self) -> bool {
        matches!(self, Self::UniqueConflict { .. })
    }

    /// Returns true when the call was rejected before reaching the store.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
