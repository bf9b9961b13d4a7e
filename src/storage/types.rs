//! Storage types for the parent `expenses` table.

use serde::{Deserialize, Serialize};

/// An expense category that items are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Row id.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl Expense {
    /// Create an expense value.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
