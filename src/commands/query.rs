use crate::database::{Database, QueryResult, Row};
use crate::error::DbResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::time::{Duration, Instant};
use tracing::debug;

pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        QueryExecutor
    }

    /// Run `sql`, returning its rows and how long it took.
    pub fn execute(&self, db: &dyn Database, sql: &str) -> DbResult<(QueryResult, Duration)> {
        let start_time = Instant::now();
        let result = db.execute(sql)?;
        let duration = start_time.elapsed();

        debug!(rows = result.rows.len(), ?duration, "statement finished");
        Ok((result, duration))
    }

    /// Text printed after an evaluated input: the rows and their count when
    /// there are any, then the elapsed time when timing is on, then a
    /// blank line.
    pub fn render(&self, result: Option<&QueryResult>, duration: Duration, timing: bool) -> String {
        let mut out = String::new();

        if let Some(result) = result {
            out.push_str(&render_rows(&result.rows));
            out.push('\n');
            let count = result.rows.len();
            out.push_str(&format!(
                "({} row{})\n",
                count,
                if count == 1 { "" } else { "s" }
            ));
        }

        if timing {
            out.push_str(&format!(
                "\nTime: {:.3} ms\n",
                duration.as_secs_f64() * 1000.0
            ));
        }

        out.push('\n');
        out
    }
}

impl Default for QueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows as a JSON document indented by four spaces, keys sorted.
pub fn render_rows(rows: &[Row]) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));

    match rows.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(e) => format!("{:?}", e),
    }
}
