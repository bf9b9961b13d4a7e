//! Predicate accumulation for dynamically filtered statements.
//!
//! [`Predicates`] collects `column = ?` and set-membership fragments with
//! their values, then renders them onto a [`Statement`] as a single
//! `WHERE ... AND ...` clause.
//!
//! A set is bound as one JSON array parameter and expanded with
//! `json_each`, so its size is not limited by the statement's variable
//! count and no value is ever inlined into the SQL text.

use serde_json::Value;

use crate::traits::{SqlValue, Statement};

/// Ordered list of conjunctive predicates.
#[derive(Debug, Clone, Default)]
pub struct Predicates {
    clauses: Vec<String>,
    params: Vec<SqlValue>,
}

impl Predicates {
    /// Create an empty predicate list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = ?`.
    pub fn equals(&mut self, column: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.clauses.push(format!("{column} = ?"));
        self.params.push(value.into());
        self
    }

    /// Add `column = ?` when a value is present.
    pub fn equals_opt<T: Into<SqlValue>>(&mut self, column: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.equals(column, value);
        }
        self
    }

    /// Add `column IN (SELECT value FROM json_each(?))`.
    ///
    /// The whole set is one parameter: a JSON array of the values.
    pub fn is_in<I, T>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let array = Value::Array(values.into_iter().map(Into::into).collect());
        self.clauses
            .push(format!("{column} IN (SELECT value FROM json_each(?))"));
        self.params.push(SqlValue::Text(array.to_string()));
        self
    }

    /// Returns true if no predicate was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Append ` WHERE a AND b ...` and the bound values to `statement`.
    ///
    /// An empty list leaves the statement untouched.
    #[must_use]
    pub fn apply(self, statement: Statement) -> Statement {
        if self.clauses.is_empty() {
            return statement;
        }
        statement
            .push_sql(" WHERE ")
            .push_sql(&self.clauses.join(" AND "))
            .bind_all(self.params)
    }
}
