//! Core `SQLite` storage implementation.
//!
//! This module provides the main [`SqliteStorage`] struct, pool setup,
//! migrations, and driver error classification.

#![allow(clippy::missing_errors_doc)]

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::{Config, DEFAULT_MAX_CONNECTIONS};
use crate::error::StorageError;

/// `SQLite` storage backend.
///
/// Owns the connection pool and implements
/// [`DbAccess`](crate::traits::DbAccess) over it.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
}

impl SqliteStorage {
    /// Get a clone of the connection pool.
    #[must_use]
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Open (or create) the database at `database_path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails, or
    /// [`StorageError::MigrationFailed`] if the schema cannot be applied.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open(database_path.as_ref(), DEFAULT_MAX_CONNECTIONS).await
    }

    /// Open the database named by `config`.
    pub async fn from_config(config: &Config) -> Result<Self, StorageError> {
        Self::open(Path::new(&config.database_path), config.max_connections).await
    }

    async fn open(path: &Path, max_connections: u32) -> Result<Self, StorageError> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| StorageError::ConnectionFailed {
                    message: format!("Invalid database path: {e}"),
                })?
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to connect to database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        tracing::info!(path = %path.display(), max_connections, "Expense database ready");
        Ok(storage)
    }

    /// Create a new in-memory `SQLite` storage instance for testing.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StorageError::ConnectionFailed {
                message: format!("Invalid memory database options: {e}"),
            }
        })?;

        // One connection: each in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Run database migrations.
    ///
    /// Each migration is idempotent (uses IF NOT EXISTS).
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        let schema_001 = include_str!("../../migrations/001_initial_schema.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        tracing::debug!(version = "001", "Migration applied");
        Ok(())
    }

    /// Create a query error with the given query name and message.
    pub(crate) fn query_error(query: &str, message: String) -> StorageError {
        StorageError::QueryFailed {
            query: query.to_string(),
            message,
        }
    }

    /// Classify a driver error raised by the statement `query`.
    ///
    /// Unique-constraint violations become [`StorageError::UniqueConflict`];
    /// everything else is a [`StorageError::QueryFailed`].
    pub(crate) fn classify_error(query: &str, err: &sqlx::Error) -> StorageError {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::UniqueConflict {
                    query: query.to_string(),
                    message: db.message().to_string(),
                }
            }
            other => Self::query_error(query, format!("{other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod tests {
    use super::*;
    use serial_test::serial;

    pub async fn test_storage() -> SqliteStorage {
        SqliteStorage::new_in_memory()
            .await
            .expect("Failed to create test storage")
    }

    #[tokio::test]
    #[serial]
    async fn test_new_in_memory() {
        let storage = SqliteStorage::new_in_memory().await;
        assert!(storage.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_new_with_nested_path() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("deeply").join("nested").join("expenses.db");

        let storage = SqliteStorage::new(&db_path).await;
        assert!(storage.is_ok());
        assert!(db_path.exists());
    }

    #[tokio::test]
    #[serial]
    async fn test_from_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            database_path: temp_dir
                .path()
                .join("expenses.db")
                .to_string_lossy()
                .into_owned(),
            max_connections: 2,
            ..Config::default()
        };

        let storage = SqliteStorage::from_config(&config).await.unwrap();
        assert_eq!(storage.get_pool().options().get_max_connections(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_migrations_are_idempotent() {
        let storage = test_storage().await;
        assert!(storage.run_migrations().await.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_schema_tables_exist() {
        let storage = test_storage().await;
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name LIKE 'expenses%' ORDER BY name",
        )
        .fetch_all(&storage.get_pool())
        .await
        .unwrap();

        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["expenses", "expenses_items"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_classify_unique_violation() {
        let storage = test_storage().await;
        let pool = storage.get_pool();
        let insert = "INSERT INTO expenses_items (expenseid, ref, amount, status, locationid, userid, dt)
                      VALUES (1, 'dup', '1', 0, 1, 1, '2016-04-18T16:24:00+00:00')";

        sqlx::query(insert).execute(&pool).await.unwrap();
        let err = sqlx::query(insert).execute(&pool).await.unwrap_err();

        let classified = SqliteStorage::classify_error("INSERT expenses_items", &err);
        assert!(classified.is_unique_conflict());
    }

    #[test]
    fn test_classify_other_error() {
        let classified = SqliteStorage::classify_error("SELECT x", &sqlx::Error::RowNotFound);
        match classified {
            StorageError::QueryFailed { query, .. } => assert_eq!(query, "SELECT x"),
            other => panic!("Expected QueryFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_query_error() {
        let err = SqliteStorage::query_error("SELECT * FROM foo", "some db error".to_string());

        match err {
            StorageError::QueryFailed { query, message } => {
                assert_eq!(query, "SELECT * FROM foo");
                assert_eq!(message, "some db error");
            }
            _ => panic!("Expected QueryFailed error"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_storage_debug() {
        let storage = test_storage().await;
        let debug = format!("{storage:?}");
        assert!(debug.contains("SqliteStorage"));
    }
}
