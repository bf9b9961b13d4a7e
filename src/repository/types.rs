//! Expense item types.
//!
//! - [`NewExpenseItem`]: every writable column of an item
//! - [`ExpenseItem`]: a stored item
//! - [`ExpenseItemRow`]: one row of the expense-joined listing
//! - [`RefSelector`] / [`ItemIds`]: single-or-many lookup keys

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;

/// Writable fields of an expense item.
///
/// Both `create` and `edit` bind every field; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpenseItem {
    /// Owning expense.
    #[serde(rename = "expenseid")]
    pub expense_id: i64,
    /// Unique reference code.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Monetary amount.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Caller-defined status code.
    pub status: i32,
    /// Owning business location.
    #[serde(rename = "locationid")]
    pub location_id: i64,
    /// Creating or acting user.
    #[serde(rename = "userid")]
    pub user_id: i64,
    /// Item timestamp.
    pub dt: DateTime<Utc>,
}

impl NewExpenseItem {
    /// Create an item with no notes and status `0`.
    #[must_use]
    pub fn new(
        expense_id: i64,
        reference: impl Into<String>,
        amount: Decimal,
        location_id: i64,
        user_id: i64,
        dt: DateTime<Utc>,
    ) -> Self {
        Self {
            expense_id,
            reference: reference.into(),
            amount,
            notes: None,
            status: 0,
            location_id,
            user_id,
            dt,
        }
    }

    /// Set notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set status code.
    #[must_use]
    pub const fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }
}

/// An item as stored in `expenses_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    /// Store-generated identifier.
    pub id: i64,
    /// Owning expense.
    #[serde(rename = "expenseid")]
    pub expense_id: i64,
    /// Unique reference code.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Monetary amount.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Caller-defined status code.
    pub status: i32,
    /// Owning business location.
    #[serde(rename = "locationid")]
    pub location_id: i64,
    /// Creating or acting user.
    #[serde(rename = "userid")]
    pub user_id: i64,
    /// Item timestamp.
    pub dt: DateTime<Utc>,
}

impl From<&ExpenseItem> for NewExpenseItem {
    fn from(item: &ExpenseItem) -> Self {
        Self {
            expense_id: item.expense_id,
            reference: item.reference.clone(),
            amount: item.amount,
            notes: item.notes.clone(),
            status: item.status,
            location_id: item.location_id,
            user_id: item.user_id,
            dt: item.dt,
        }
    }
}

/// One row of the joined listing.
///
/// The listing pivots on `expenses`, so an expense without items still
/// yields a row; its `item` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItemRow {
    /// Parent expense identifier.
    pub expense_id: i64,
    /// Parent expense name.
    pub expense: String,
    /// The item, if the expense has one on this row.
    pub item: Option<ExpenseItem>,
}

/// Reference lookup key: one reference or a set of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefSelector {
    /// A single reference; must be numeric once hyphens are removed.
    One(String),
    /// Any of these references.
    Many(Vec<String>),
}

impl From<&str> for RefSelector {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for RefSelector {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for RefSelector {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for RefSelector {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(ToString::to_string).collect())
    }
}

impl TryFrom<&Value> for RefSelector {
    type Error = StorageError;

    /// Accepts a string, a number, or an array of those.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(values) => values
                .iter()
                .map(|v| scalar_text(v).ok_or_else(|| shape_error("ref", v)))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Many),
            other => scalar_text(other)
                .map(Self::One)
                .ok_or_else(|| shape_error("ref", other)),
        }
    }
}

/// Item id selector: one id or a set of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemIds {
    /// A single id.
    One(i64),
    /// Every id in the set.
    Many(Vec<i64>),
}

impl From<i64> for ItemIds {
    fn from(value: i64) -> Self {
        Self::One(value)
    }
}

impl From<Vec<i64>> for ItemIds {
    fn from(values: Vec<i64>) -> Self {
        Self::Many(values)
    }
}

impl From<&[i64]> for ItemIds {
    fn from(values: &[i64]) -> Self {
        Self::Many(values.to_vec())
    }
}

impl TryFrom<&Value> for ItemIds {
    type Error = StorageError;

    /// Accepts an integer, an integer-valued string, or an array of those.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(values) => values
                .iter()
                .map(|v| scalar_id(v).ok_or_else(|| shape_error("id", v)))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Many),
            other => scalar_id(other)
                .map(Self::One)
                .ok_or_else(|| shape_error("id", other)),
        }
    }
}

/// Whether a single reference may be looked up.
///
/// Hyphens are removed first, so invoice-style codes such as `"1-2-345"`
/// qualify. The remainder must read as a decimal number: optional leading
/// `+`, digits with an optional fraction, optional exponent. Surrounding
/// whitespace is ignored.
#[must_use]
pub fn is_numeric_ref(value: &str) -> bool {
    let stripped: String = value.chars().filter(|c| *c != '-').collect();
    let s = stripped.trim();
    let s = s.strip_prefix('+').unwrap_or(s);

    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_ok = !(int_part.is_empty() && frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit());

    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix('+').unwrap_or(e);
        !e.is_empty() && e.bytes().all(|b| b.is_ascii_digit())
    });

    mantissa_ok && exponent_ok
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings that denote a whole number, so `"5.0"` and
/// `"1e2"` are ids while `1.5` is not.
fn scalar_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}

fn shape_error(field: &str, value: &Value) -> StorageError {
    StorageError::invalid_input(field, format!("unsupported value {value}"))
}
