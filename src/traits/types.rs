//! Shared types for the traits module.
//!
//! - [`SqlValue`]: A dynamically typed column or parameter value
//! - [`Statement`]: SQL text plus its ordered bound parameters
//! - [`Row`]: An ordered column-name to value mapping

use crate::error::StorageError;

/// A value bound into a statement or read back from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL`.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// Double-precision float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
}

impl SqlValue {
    /// Returns true for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A parameterized SQL statement.
///
/// Placeholders are positional (`?`); `params` holds their values in order.
/// The `label` names the statement in logs and error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    label: &'static str,
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    /// Create a statement with no bound parameters.
    #[must_use]
    pub fn new(label: &'static str, sql: impl Into<String>) -> Self {
        Self {
            label,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter.
    #[must_use]
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Append raw SQL text.
    #[must_use]
    pub fn push_sql(mut self, sql: &str) -> Self {
        self.sql.push_str(sql);
        self
    }

    /// Append several parameters in order.
    #[must_use]
    pub fn bind_all(mut self, values: impl IntoIterator<Item = SqlValue>) -> Self {
        self.params.extend(values);
        self
    }

    /// Statement label used for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// The SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

/// One result row: column names mapped to values, in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `capacity` columns.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a column.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.push((name.into(), value.into()));
    }

    /// Builder form of [`Row::push`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Look up a column by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Read a column as an integer. `NULL` reads as `None`.
    ///
    /// Text holding an integer is accepted, matching the store's own coercion.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the column is missing or not integral.
    pub fn integer(&self, name: &str) -> Result<Option<i64>, StorageError> {
        match self.require(name)? {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(value) => Ok(Some(*value)),
            SqlValue::Text(text) => text.trim().parse().map(Some).map_err(|_| {
                Self::type_error(name, "integer", text)
            }),
            SqlValue::Real(value) => Err(Self::type_error(name, "integer", &value.to_string())),
        }
    }

    /// Read a column as text. `NULL` reads as `None`; numbers are rendered.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the column is missing.
    pub fn text(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(match self.require(name)? {
            SqlValue::Null => None,
            SqlValue::Integer(value) => Some(value.to_string()),
            SqlValue::Real(value) => Some(value.to_string()),
            SqlValue::Text(text) => Some(text.clone()),
        })
    }

    fn require(&self, name: &str) -> Result<&SqlValue, StorageError> {
        self.get(name).ok_or_else(|| StorageError::Internal {
            message: format!("Missing column '{name}'"),
        })
    }

    fn type_error(name: &str, expected: &str, found: &str) -> StorageError {
        StorageError::Internal {
            message: format!("Column '{name}' is not {expected}: '{found}'"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sql_value_from_option() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".into()));
        assert_eq!(SqlValue::from(Some(7_i64)), SqlValue::Integer(7));
        assert!(SqlValue::from(None::<i64>).is_null());
    }

    #[test]
    fn test_statement_builder_keeps_param_order() {
        let stmt = Statement::new("SELECT t", "SELECT * FROM t WHERE a = ?")
            .bind(1_i64)
            .push_sql(" AND b = ?")
            .bind("two");

        assert_eq!(stmt.label(), "SELECT t");
        assert_eq!(stmt.sql(), "SELECT * FROM t WHERE a = ? AND b = ?");
        assert_eq!(
            stmt.params(),
            &[SqlValue::Integer(1), SqlValue::Text("two".into())]
        );
    }

    #[test]
    fn test_statement_bind_all() {
        let stmt = Statement::new("DELETE t", "DELETE FROM t WHERE id IN (?, ?)")
            .bind_all(vec![SqlValue::Integer(1), SqlValue::Integer(2)]);
        assert_eq!(stmt.params().len(), 2);
    }

    #[test]
    fn test_row_lookup() {
        let row = Row::new()
            .with("id", 3_i64)
            .with("name", "Fuel")
            .with("notes", None::<String>);

        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
        assert_eq!(row.integer("id").unwrap(), Some(3));
        assert_eq!(row.text("name").unwrap(), Some("Fuel".to_string()));
        assert_eq!(row.text("notes").unwrap(), None);
        assert_eq!(row.integer("notes").unwrap(), None);
        assert_eq!(
            row.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["id", "name", "notes"]
        );
    }

    #[test]
    fn test_row_integer_coerces_text() {
        let row = Row::new().with("status", "2");
        assert_eq!(row.integer("status").unwrap(), Some(2));
    }

    #[test]
    fn test_row_integer_rejects_non_numeric() {
        let row = Row::new().with("status", "open");
        let err = row.integer("status").unwrap_err();
        assert!(matches!(err, StorageError::Internal { message } if message.contains("status")));
    }

    #[test]
    fn test_row_text_renders_numbers() {
        let row = Row::new().with("amount", 12_i64).with("rate", 1.5_f64);
        assert_eq!(row.text("amount").unwrap(), Some("12".to_string()));
        assert_eq!(row.text("rate").unwrap(), Some("1.5".to_string()));
    }

    #[test]
    fn test_row_missing_column() {
        let row = Row::new();
        assert!(row.text("missing").is_err());
        assert!(row.integer("missing").is_err());
    }
}
