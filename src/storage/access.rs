//! [`DbAccess`] implementation for [`SqliteStorage`].
//!
//! Binds each [`SqlValue`] positionally and decodes result rows by their
//! runtime storage class.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row as _, Sqlite, TypeInfo, ValueRef};

use super::SqliteStorage;
use crate::error::StorageError;
use crate::traits::{DbAccess, Row, SqlValue, Statement};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

fn build(statement: &Statement) -> SqliteQuery<'_> {
    statement
        .params()
        .iter()
        .fold(sqlx::query(statement.sql()), |query, value| match value {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        })
}

fn decode_row(label: &str, row: &SqliteRow) -> Result<Row, StorageError> {
    let mut out = Row::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row
            .try_get_raw(index)
            .map_err(|e| SqliteStorage::query_error(label, format!("{e}")))?;

        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" => SqlValue::Integer(
                    row.try_get(index)
                        .map_err(|e| SqliteStorage::query_error(label, format!("{e}")))?,
                ),
                "REAL" => SqlValue::Real(
                    row.try_get(index)
                        .map_err(|e| SqliteStorage::query_error(label, format!("{e}")))?,
                ),
                "TEXT" => SqlValue::Text(
                    row.try_get(index)
                        .map_err(|e| SqliteStorage::query_error(label, format!("{e}")))?,
                ),
                other => {
                    return Err(StorageError::Internal {
                        message: format!(
                            "{label}: unsupported column type {other} for '{}'",
                            column.name()
                        ),
                    })
                }
            }
        };
        out.push(column.name(), value);
    }
    Ok(out)
}

#[async_trait]
impl DbAccess for SqliteStorage {
    async fn insert(&self, statement: Statement) -> Result<i64, StorageError> {
        let label = statement.label();
        tracing::debug!(statement = label, params = statement.params().len(), "insert");

        let result = build(&statement)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::classify_error(label, &e))?;

        Ok(result.last_insert_rowid())
    }

    async fn select(&self, statement: Statement) -> Result<Vec<Row>, StorageError> {
        let label = statement.label();
        tracing::debug!(statement = label, params = statement.params().len(), "select");

        let rows = build(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::classify_error(label, &e))?;

        rows.iter().map(|row| decode_row(label, row)).collect()
    }

    async fn update(&self, statement: Statement) -> Result<u64, StorageError> {
        let label = statement.label();
        tracing::debug!(statement = label, params = statement.params().len(), "update");

        let result = build(&statement)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::classify_error(label, &e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, statement: Statement) -> Result<u64, StorageError> {
        let label = statement.label();
        tracing::debug!(statement = label, params = statement.params().len(), "delete");

        let result = build(&statement)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::classify_error(label, &e))?;

        Ok(result.rows_affected())
    }
}
