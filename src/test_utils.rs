//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock store factories for [`DbAccess`](crate::traits::DbAccess)
//! - Expense item fixtures
//! - Rows shaped like the joined listing query
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::error::StorageError;
use crate::repository::NewExpenseItem;
use crate::traits::{MockDbAccess, Row, SqlValue};

/// Fixed timestamp used by fixtures.
#[must_use]
pub fn sample_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 4, 18, 16, 24, 0).unwrap()
}

/// A complete item: amount `12.50`, location `1`, user `1`.
#[must_use]
pub fn sample_item(expense_id: i64, reference: &str) -> NewExpenseItem {
    NewExpenseItem::new(
        expense_id,
        reference,
        Decimal::new(1250, 2),
        1,
        1,
        sample_time(),
    )
}

/// Build a row in the column order of the joined listing.
///
/// `item` is `(id, fields)`; `None` yields the all-`NULL` item columns an
/// expense without items produces.
#[must_use]
pub fn joined_row(expense_id: i64, expense: &str, item: Option<(i64, &NewExpenseItem)>) -> Row {
    let row = Row::new()
        .with("expense_id", expense_id)
        .with("expense", expense);

    match item {
        Some((id, fields)) => row
            .with("id", id)
            .with("expenseid", fields.expense_id)
            .with("ref", fields.reference.as_str())
            .with("amount", fields.amount.to_string())
            .with("notes", fields.notes.clone())
            .with("status", fields.status)
            .with("locationid", fields.location_id)
            .with("userid", fields.user_id)
            .with("dt", fields.dt.to_rfc3339()),
        None => [
            "id",
            "expenseid",
            "ref",
            "amount",
            "notes",
            "status",
            "locationid",
            "userid",
            "dt",
        ]
        .into_iter()
        .fold(row, |row, column| row.with(column, SqlValue::Null)),
    }
}

/// A mock store that fails the test if any statement reaches it.
#[must_use]
pub fn mock_db_untouched() -> MockDbAccess {
    let mut mock = MockDbAccess::new();
    mock.expect_insert().never();
    mock.expect_select().never();
    mock.expect_update().never();
    mock.expect_delete().never();
    mock
}

/// A mock store whose every call fails with `error`.
#[must_use]
pub fn mock_db_failing(error: StorageError) -> MockDbAccess {
    let mut mock = MockDbAccess::new();
    let e = error.clone();
    mock.expect_insert().returning(move |_| Err(e.clone()));
    let e = error.clone();
    mock.expect_select().returning(move |_| Err(e.clone()));
    let e = error.clone();
    mock.expect_update().returning(move |_| Err(e.clone()));
    mock.expect_delete().returning(move |_| Err(error.clone()));
    mock
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ExpenseItemRepository;

    #[test]
    fn test_joined_row_without_item_is_null() {
        let row = joined_row(1, "Rent", None);
        assert_eq!(row.len(), 11);
        assert_eq!(row.integer("id").unwrap(), None);
        assert_eq!(row.text("expense").unwrap(), Some("Rent".to_string()));
    }

    #[test]
    fn test_joined_row_with_item() {
        let item = sample_item(1, "1001");
        let row = joined_row(1, "Rent", Some((3, &item)));
        assert_eq!(row.len(), 11);
        assert_eq!(row.integer("id").unwrap(), Some(3));
        assert_eq!(row.text("amount").unwrap(), Some("12.50".to_string()));
    }

    #[tokio::test]
    async fn test_mock_db_failing_fails_every_operation() {
        let error = StorageError::ConnectionFailed {
            message: "pool closed".into(),
        };
        let repo = ExpenseItemRepository::new(mock_db_failing(error.clone()));
        let item = sample_item(1, "1001");

        assert_eq!(repo.create(&item).await.unwrap_err(), error);
        assert_eq!(repo.get(None, None).await.unwrap_err(), error);
        assert_eq!(repo.get_by_ref("1001").await.unwrap_err(), error);
        assert_eq!(repo.edit(1, &item).await.unwrap_err(), error);
        assert_eq!(repo.remove(1_i64).await.unwrap_err(), error);
    }
}
