use crate::error::{Error, Result};

pub const NO_FIELDS_MESSAGE: &str = "No fields provided for update";

/// Positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        SqlValue::UInt(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

/// Partial UPDATE over an ordered list of `(column, value)` pairs. Absent
/// values are skipped; columns are always static names, never request input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    assignments: Vec<(&'static str, SqlValue)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<SqlValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.assignments.push((column, value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    pub fn assignments(&self) -> &[(&'static str, SqlValue)] {
        &self.assignments
    }

    /// Rejects a request that supplied none of the updatable fields.
    pub fn require_fields(self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::BadRequest(NO_FIELDS_MESSAGE.to_string()));
        }
        Ok(self)
    }

    /// Renders `UPDATE <table> SET a = ?, b = ? WHERE <key> = ?` and its
    /// parameters. An empty set is a rejected request.
    pub fn into_statement(
        self,
        table: &str,
        key_column: &str,
        key: impl Into<SqlValue>,
    ) -> Result<(String, Vec<SqlValue>)> {
        let set = self.require_fields()?;

        let clause = set
            .assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, clause, key_column);

        let mut params: Vec<SqlValue> = set.assignments.into_iter().map(|(_, v)| v).collect();
        params.push(key.into());
        Ok((sql, params))
    }
}
