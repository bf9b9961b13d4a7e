//! Expense (parent) storage operations.
//!
//! Items reference an expense by id; these helpers manage the parent rows.

#![allow(clippy::missing_errors_doc)]

use sqlx::Row;

use super::core::SqliteStorage;
use super::types::Expense;
use crate::error::StorageError;

impl SqliteStorage {
    /// Create an expense and return its id.
    pub async fn create_expense(&self, name: &str) -> Result<i64, StorageError> {
        if name.trim().is_empty() {
            return Err(StorageError::invalid_input("name", "must not be blank"));
        }

        let result = sqlx::query("INSERT INTO expenses (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::classify_error("INSERT expenses", &e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, name, "Created expense");
        Ok(id)
    }

    /// Get an expense by id.
    pub async fn get_expense(&self, id: i64) -> Result<Option<Expense>, StorageError> {
        let row = sqlx::query("SELECT id, name FROM expenses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT expenses", format!("{e}")))?;

        row.map(|row| -> Result<Expense, StorageError> {
            let id: i64 = row
                .try_get("id")
                .map_err(|e| Self::query_error("SELECT expenses", format!("{e}")))?;
            let name: String = row
                .try_get("name")
                .map_err(|e| Self::query_error("SELECT expenses", format!("{e}")))?;
            Ok(Expense::new(id, name))
        })
        .transpose()
    }
}
