//! Expense item repository.
//!
//! [`ExpenseItemRepository`] turns typed calls into parameterized
//! statements against `expenses_items` and hands them to a [`DbAccess`].
//! Reads join the parent `expenses` row so every result carries the
//! expense name.
//!
//! # Example
//!
//! ```ignore
//! use wpos_expenses::repository::{ExpenseItemRepository, NewExpenseItem};
//! use wpos_expenses::storage::SqliteStorage;
//!
//! let repo = ExpenseItemRepository::new(SqliteStorage::new("./data/expenses.db").await?);
//! let id = repo.create(&item).await?;
//! let rows = repo.get(Some(item.expense_id), None).await?;
//! ```

#![allow(clippy::missing_errors_doc)]

mod query;
mod types;

pub use query::Predicates;
pub use types::{
    is_numeric_ref, ExpenseItem, ExpenseItemRow, ItemIds, NewExpenseItem, RefSelector,
};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::StorageError;
use crate::traits::{DbAccess, Row, Statement};

const SELECT_JOINED: &str = "SELECT e.id AS expense_id, e.name AS expense, \
     i.id, i.expenseid, i.ref, i.amount, i.notes, i.status, i.locationid, i.userid, i.dt \
     FROM expenses_items AS i RIGHT OUTER JOIN expenses AS e ON i.expenseid = e.id";

const ORDER_JOINED: &str = " ORDER BY e.id, i.id";

const INSERT_ITEM: &str = "INSERT INTO expenses_items \
     (expenseid, ref, amount, notes, status, locationid, userid, dt) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

const UPDATE_ITEM: &str = "UPDATE expenses_items SET expenseid = ?, ref = ?, amount = ?, \
     notes = ?, status = ?, locationid = ?, userid = ?, dt = ? WHERE id = ?";

const DELETE_ITEMS: &str = "DELETE FROM expenses_items";

/// CRUD access to `expenses_items`.
///
/// Stateless: every method issues exactly one statement through `D`.
#[derive(Debug, Clone)]
pub struct ExpenseItemRepository<D> {
    db: D,
}

impl<D: DbAccess> ExpenseItemRepository<D> {
    /// Create a repository over a store collaborator.
    #[must_use]
    pub const fn new(db: D) -> Self {
        Self { db }
    }

    /// The underlying store collaborator.
    #[must_use]
    pub const fn db(&self) -> &D {
        &self.db
    }

    /// Insert an item and return its generated id.
    ///
    /// A duplicate `ref` surfaces as [`StorageError::UniqueConflict`].
    pub async fn create(&self, item: &NewExpenseItem) -> Result<i64, StorageError> {
        let stmt = bind_fields(Statement::new("INSERT expenses_items", INSERT_ITEM), item);
        self.db.insert(stmt).await
    }

    /// List items joined to their expense, optionally filtered.
    ///
    /// Filters combine with `AND`. With no filters, expenses that have no
    /// items appear once with `item: None`.
    pub async fn get(
        &self,
        expense_id: Option<i64>,
        location_id: Option<i64>,
    ) -> Result<Vec<ExpenseItemRow>, StorageError> {
        let mut preds = Predicates::new();
        preds
            .equals_opt("i.expenseid", expense_id)
            .equals_opt("i.locationid", location_id);

        self.select_joined("SELECT expenses_items", preds).await
    }

    /// Look items up by reference.
    ///
    /// A single reference must be numeric once hyphens are removed;
    /// otherwise the call fails with [`StorageError::InvalidInput`] and no
    /// statement is issued. A set matches any of its members.
    pub async fn get_by_ref(
        &self,
        reference: impl Into<RefSelector> + Send,
    ) -> Result<Vec<ExpenseItemRow>, StorageError> {
        let mut preds = Predicates::new();
        match reference.into() {
            RefSelector::One(value) => {
                if !is_numeric_ref(&value) {
                    tracing::debug!(reference = %value, "Rejected non-numeric reference");
                    return Err(StorageError::invalid_input(
                        "ref",
                        format!("'{value}' is not numeric"),
                    ));
                }
                preds.equals("i.ref", value);
            }
            RefSelector::Many(values) => {
                if values.is_empty() {
                    return Err(StorageError::invalid_input("ref", "empty reference list"));
                }
                preds.is_in("i.ref", values);
            }
        }

        self.select_joined("SELECT expenses_items BY ref", preds)
            .await
    }

    /// Replace every field of item `id`. Returns the affected-row count,
    /// which is `0` when no such item exists.
    pub async fn edit(&self, id: i64, item: &NewExpenseItem) -> Result<u64, StorageError> {
        let stmt = bind_fields(Statement::new("UPDATE expenses_items", UPDATE_ITEM), item).bind(id);
        self.db.update(stmt).await
    }

    /// Delete one item or a set of items in a single statement.
    ///
    /// An empty set is rejected with [`StorageError::InvalidInput`].
    pub async fn remove(&self, ids: impl Into<ItemIds> + Send) -> Result<u64, StorageError> {
        let mut preds = Predicates::new();
        match ids.into() {
            ItemIds::One(id) => {
                preds.equals("id", id);
            }
            ItemIds::Many(ids) => {
                if ids.is_empty() {
                    return Err(StorageError::invalid_input("id", "empty id list"));
                }
                preds.is_in("id", ids);
            }
        }

        let stmt = preds.apply(Statement::new("DELETE expenses_items", DELETE_ITEMS));
        self.db.delete(stmt).await
    }

    async fn select_joined(
        &self,
        label: &'static str,
        preds: Predicates,
    ) -> Result<Vec<ExpenseItemRow>, StorageError> {
        let stmt = preds
            .apply(Statement::new(label, SELECT_JOINED))
            .push_sql(ORDER_JOINED);

        let rows = self.db.select(stmt).await?;
        rows.iter().map(row_to_joined).collect()
    }
}

/// Bind the writable columns in `INSERT`/`UPDATE` column order.
fn bind_fields(stmt: Statement, item: &NewExpenseItem) -> Statement {
    stmt.bind(item.expense_id)
        .bind(&item.reference)
        .bind(item.amount.to_string())
        .bind(item.notes.clone())
        .bind(item.status)
        .bind(item.location_id)
        .bind(item.user_id)
        .bind(item.dt.to_rfc3339())
}

/// Convert one joined row.
fn row_to_joined(row: &Row) -> Result<ExpenseItemRow, StorageError> {
    let expense_id = required(row.integer("expense_id")?, "expense_id")?;
    let expense = required(row.text("expense")?, "expense")?;

    let item = match row.integer("id")? {
        Some(id) => Some(row_to_item(id, row)?),
        None => None,
    };

    Ok(ExpenseItemRow {
        expense_id,
        expense,
        item,
    })
}

fn row_to_item(id: i64, row: &Row) -> Result<ExpenseItem, StorageError> {
    let amount_text = required(row.text("amount")?, "amount")?;
    let amount = Decimal::from_str(amount_text.trim()).map_err(|e| StorageError::Internal {
        message: format!("Failed to parse amount '{amount_text}': {e}"),
    })?;

    let status = required(row.integer("status")?, "status")?;
    let status = i32::try_from(status).map_err(|_| StorageError::Internal {
        message: format!("Status {status} out of range"),
    })?;

    let dt_text = required(row.text("dt")?, "dt")?;

    Ok(ExpenseItem {
        id,
        expense_id: required(row.integer("expenseid")?, "expenseid")?,
        reference: required(row.text("ref")?, "ref")?,
        amount,
        notes: row.text("notes")?,
        status,
        location_id: required(row.integer("locationid")?, "locationid")?,
        user_id: required(row.integer("userid")?, "userid")?,
        dt: parse_datetime(&dt_text)?,
    })
}

fn required<T>(value: Option<T>, column: &str) -> Result<T, StorageError> {
    value.ok_or_else(|| StorageError::Internal {
        message: format!("Unexpected NULL in column '{column}'"),
    })
}

/// Parse a stored RFC 3339 timestamp.
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Internal {
            message: format!("Failed to parse datetime '{s}': {e}"),
        })
}
