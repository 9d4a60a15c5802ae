/*!
 * Schema cache
 *
 * Table names are fetched once per session and never refreshed; a table
 * created mid-session will not be offered. Column names are looked up
 * on demand each time they are needed.
 */

use crate::database::Database;
use crate::error::DbResult;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum TableList {
    #[default]
    NotFetched,
    Populated(Vec<String>),
}

#[derive(Debug, Default)]
pub struct SchemaCache {
    tables: TableList,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.tables, TableList::Populated(_))
    }

    /// Sorted table names, fetched on first use.
    ///
    /// A failed fetch leaves the cache unpopulated so the next call retries.
    pub fn list_tables(&mut self, db: &dyn Database) -> DbResult<&[String]> {
        if !self.is_populated() {
            let mut names = db.table_names()?;
            names.sort();
            debug!(count = names.len(), "cached table names");
            self.tables = TableList::Populated(names);
        }

        match &self.tables {
            TableList::Populated(names) => Ok(names),
            TableList::NotFetched => Ok(&[]),
        }
    }

    pub fn columns_for(&self, db: &dyn Database, table: &str) -> DbResult<Vec<String>> {
        let columns = db.column_names(table)?;
        debug!(table, count = columns.len(), "fetched column names");
        Ok(columns)
    }
}
