//! Trait definitions for mockable dependencies.
//!
//! This module defines [`DbAccess`], the store collaborator every
//! repository is written against, and re-exports the statement and row
//! types it exchanges.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates `MockDbAccess` for tests.
//!
//! # Example
//!
//! ```
//! use wpos_expenses::traits::{SqlValue, Statement};
//!
//! let stmt = Statement::new("DELETE expenses_items", "DELETE FROM expenses_items WHERE id = ?")
//!     .bind(42_i64);
//! assert_eq!(stmt.params(), &[SqlValue::Integer(42)]);
//! ```

mod types;

pub use types::{Row, SqlValue, Statement};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageError;

/// Store access trait.
///
/// Executes parameterized statements. Each call issues exactly one
/// statement; pooling, isolation and timeouts belong to the implementor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DbAccess: Send + Sync {
    /// Execute an insert and return the generated row id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UniqueConflict`] when a uniqueness constraint
    /// rejects the row, or another [`StorageError`] on any other failure.
    async fn insert(&self, statement: Statement) -> Result<i64, StorageError>;

    /// Execute a query and return every row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn select(&self, statement: Statement) -> Result<Vec<Row>, StorageError>;

    /// Execute an update and return the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn update(&self, statement: Statement) -> Result<u64, StorageError>;

    /// Execute a delete and return the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn delete(&self, statement: Statement) -> Result<u64, StorageError>;
}

/// Shared implementors stay usable behind an `Arc`.
#[async_trait]
impl<T: DbAccess + ?Sized> DbAccess for Arc<T> {
    async fn insert(&self, statement: Statement) -> Result<i64, StorageError> {
        self.as_ref().insert(statement).await
    }

    async fn select(&self, statement: Statement) -> Result<Vec<Row>, StorageError> {
        self.as_ref().select(statement).await
    }

    async fn update(&self, statement: Statement) -> Result<u64, StorageError> {
        self.as_ref().update(statement).await
    }

    async fn delete(&self, statement: Statement) -> Result<u64, StorageError> {
        self.as_ref().delete(statement).await
    }
}
