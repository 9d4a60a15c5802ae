use super::{quote_identifier, ColumnInfo, Database, QueryResult, Row};
use crate::error::{DbError, DbResult};
use rusqlite::types::ValueRef;
use serde_json::{Number, Value};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// Virtual machine instructions between deadline checks.
const PROGRESS_INTERVAL: i32 = 1000;

pub struct Connection {
    conn: rusqlite::Connection,
    path: String,
}

impl Connection {
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref().display().to_string();
        let conn = rusqlite::Connection::open(&path).map_err(|source| DbError::Open {
            path: path.clone(),
            source,
        })?;

        debug!(%path, "opened database");
        Ok(Self { conn, path })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(|source| DbError::Open {
            path: ":memory:".to_string(),
            source,
        })?;

        Ok(Self {
            conn,
            path: ":memory:".to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Database for Connection {
    fn execute(&self, sql: &str) -> DbResult<QueryResult> {
        let mut stmt = self.conn.prepare(sql)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut record = Row::new();
            for (i, name) in columns.iter().enumerate() {
                record.insert(name.clone(), to_json(row.get_ref(i)?));
            }
            rows.push(record);
        }

        Ok(QueryResult { columns, rows })
    }

    fn table_names(&self) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn column_names(&self, table: &str) -> DbResult<Vec<String>> {
        let sql = format!("SELECT * FROM {} WHERE FALSE", quote_identifier(table));
        let stmt = self.conn.prepare(&sql)?;
        Ok(stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect())
    }

    fn table_info(&self, table: &str) -> DbResult<Vec<ColumnInfo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, type, \"notnull\" FROM pragma_table_info(?1)")?;
        let columns = stmt
            .query_map([table], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                    not_null: row.get::<_, i64>(2)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(DbError::NoSuchTable(table.to_string()));
        }
        Ok(columns)
    }

    fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    fn set_query_deadline(&self, limit: Option<Duration>) {
        match limit {
            Some(limit) => {
                let deadline = Instant::now() + limit;
                self.conn
                    .progress_handler(PROGRESS_INTERVAL, Some(move || Instant::now() >= deadline));
            }
            None => self
                .conn
                .progress_handler(PROGRESS_INTERVAL, None::<fn() -> bool>),
        }
    }
}

/// Map a SQLite value onto JSON; values JSON cannot hold become text.
fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        ValueRef::Text(text) => Value::String(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}
