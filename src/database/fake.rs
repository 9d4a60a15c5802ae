//! In-memory stand-in for the database used by unit tests.

use super::{ColumnInfo, Database, QueryResult};
use crate::error::{DbError, DbResult};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct FakeDatabase {
    tables: BTreeMap<String, Vec<ColumnInfo>>,
    queries: AtomicUsize,
    failing: AtomicBool,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, columns: &[&str]) -> Self {
        let columns = columns
            .iter()
            .map(|column| ColumnInfo {
                name: column.to_string(),
                data_type: "TEXT".to_string(),
                not_null: false,
            })
            .collect();
        self.tables.insert(name.to_string(), columns);
        self
    }

    /// Number of queries issued so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Make every subsequent query fail.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn record(&self) -> DbResult<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::NoSuchTable("database unavailable".to_string()));
        }
        Ok(())
    }
}

impl Database for FakeDatabase {
    fn execute(&self, _sql: &str) -> DbResult<QueryResult> {
        self.record()?;
        Ok(QueryResult::default())
    }

    fn table_names(&self) -> DbResult<Vec<String>> {
        self.record()?;
        Ok(self.tables.keys().cloned().collect())
    }

    fn column_names(&self, table: &str) -> DbResult<Vec<String>> {
        self.record()?;
        self.tables
            .get(table)
            .map(|columns| columns.iter().map(|c| c.name.clone()).collect())
            .ok_or_else(|| DbError::NoSuchTable(table.to_string()))
    }

    fn table_info(&self, table: &str) -> DbResult<Vec<ColumnInfo>> {
        self.record()?;
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| DbError::NoSuchTable(table.to_string()))
    }

    fn in_transaction(&self) -> bool {
        false
    }

    fn set_query_deadline(&self, _limit: Option<Duration>) {}
}
