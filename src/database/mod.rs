/*!
 * Database collaborator
 *
 * The REPL only needs a narrow view of the backing database:
 * - Executing a statement and collecting its rows
 * - Enumerating tables and their columns
 * - Per-column metadata for `\d`
 */

pub mod connection;
#[cfg(test)]
pub mod fake;

use crate::error::DbResult;
use serde_json::Value;
use std::time::Duration;

pub use connection::Connection;

/// One result row: column name -> value, keys kept sorted.
pub type Row = serde_json::Map<String, Value>;

/// Rows returned by a statement, in the order the database produced them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Build a single-column result, one row per value.
    pub fn single_column(column: &str, values: impl IntoIterator<Item = String>) -> Self {
        let rows = values
            .into_iter()
            .map(|value| {
                let mut row = Row::new();
                row.insert(column.to_string(), Value::String(value));
                row
            })
            .collect();

        Self {
            columns: vec![column.to_string()],
            rows,
        }
    }
}

/// Column metadata as reported for `\d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub not_null: bool,
}

pub trait Database {
    /// Run one statement and collect every row it produces.
    fn execute(&self, sql: &str) -> DbResult<QueryResult>;

    /// Names of all user tables.
    fn table_names(&self) -> DbResult<Vec<String>>;

    /// Column names of `table`, in declaration order. Returns no rows.
    fn column_names(&self, table: &str) -> DbResult<Vec<String>>;

    /// Fails with `NoSuchTable` when the table has no columns to report.
    fn table_info(&self, table: &str) -> DbResult<Vec<ColumnInfo>>;

    fn in_transaction(&self) -> bool;

    /// Interrupt any query still running once `limit` has elapsed.
    /// `None` removes the deadline.
    fn set_query_deadline(&self, limit: Option<Duration>);
}

/// Quote an identifier for interpolation into SQL text.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn single_column_result_keeps_order() {
        let result =
            QueryResult::single_column("name", vec!["orders".to_string(), "users".to_string()]);
        assert_eq!(result.columns, vec!["name"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0]["name"], Value::String("orders".into()));
        assert_eq!(result.rows[1]["name"], Value::String("users".into()));
    }
}
