/*!
 * Meta-commands
 *
 * Backslash directives handled by the REPL itself instead of the database.
 */

use crate::database::{ColumnInfo, QueryResult};
use crate::error::{DbError, DbResult};
use crate::session::Session;
use crate::statement::META_COMMAND_MARKER;
use tracing::debug;

const COLUMN_WIDTH: usize = 20;
const REPORT_WIDTH: usize = 62;

pub const MISSING_TABLE_NAME: &str = "Missing required parameter tablename";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `\dt`
    ListTables,
    /// `\d` / `\d+`, with the table name when one was given
    DescribeTable(Option<String>),
    /// `\timing`
    ToggleTiming,
    /// `\?` / `\h`
    Help,
    /// `\q`
    Quit,
    Unknown(String),
}

/// What the driver loop should show or do after a meta-command.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaOutcome {
    /// Printed like a statement result.
    Rows(QueryResult),
    /// Printed verbatim.
    Message(String),
    Quit,
    UnknownMetaCommand(String),
}

impl MetaCommand {
    pub fn parse(line: &str) -> Self {
        let raw = line.trim();
        let body = raw.trim_start_matches(META_COMMAND_MARKER);
        let mut words = body.split_whitespace();

        let command = match words.next() {
            Some(command) => command,
            None => return MetaCommand::Unknown(raw.to_string()),
        };

        match command {
            "dt" => MetaCommand::ListTables,
            "d" | "d+" => {
                let table = words.next().map(String::from);
                if let Some(extra) = words.next() {
                    debug!(extra, "ignoring extra arguments to \\d");
                }
                MetaCommand::DescribeTable(table)
            }
            "timing" => MetaCommand::ToggleTiming,
            "?" | "h" => MetaCommand::Help,
            "q" => MetaCommand::Quit,
            _ => MetaCommand::Unknown(raw.to_string()),
        }
    }

    pub fn dispatch(self, session: &mut Session) -> DbResult<MetaOutcome> {
        match self {
            MetaCommand::ListTables => {
                let tables = session.db().table_names()?;
                Ok(MetaOutcome::Rows(QueryResult::single_column("name", tables)))
            }
            MetaCommand::DescribeTable(None) => {
                Ok(MetaOutcome::Message(MISSING_TABLE_NAME.to_string()))
            }
            MetaCommand::DescribeTable(Some(table)) => {
                match session.db().table_info(&table) {
                    Ok(columns) => Ok(MetaOutcome::Message(describe_table(&table, &columns))),
                    Err(DbError::NoSuchTable(_)) => Ok(MetaOutcome::Message(format!(
                        "Did not find any relation named \"{}\".",
                        table
                    ))),
                    Err(e) => Err(e),
                }
            }
            MetaCommand::ToggleTiming => {
                let state = if session.toggle_timing() { "on" } else { "off" };
                Ok(MetaOutcome::Message(format!("Timing is {}.", state)))
            }
            MetaCommand::Help => Ok(MetaOutcome::Message(help_text())),
            MetaCommand::Quit => Ok(MetaOutcome::Quit),
            MetaCommand::Unknown(raw) => Ok(MetaOutcome::UnknownMetaCommand(raw)),
        }
    }
}

/// Three-column report of a table's columns.
pub fn describe_table(table: &str, columns: &[ColumnInfo]) -> String {
    let mut lines = Vec::with_capacity(columns.len() + 3);

    lines.push(format!(
        "{:^width$}",
        format!("Table \"{}\" ", table),
        width = REPORT_WIDTH
    ));
    lines.push(
        ["Column", "Type", "Nullable"]
            .iter()
            .map(|h| format!("{:^width$}", h, width = COLUMN_WIDTH))
            .collect::<Vec<_>>()
            .join("|"),
    );
    lines.push(vec!["-".repeat(COLUMN_WIDTH); 3].join("|"));

    for column in columns {
        lines.push(format!(
            "{:^w$}|{:^w$}|{:^w$}",
            column.name,
            column.data_type.to_lowercase(),
            if column.not_null { "not null" } else { "" },
            w = COLUMN_WIDTH
        ));
    }

    lines.join("\n")
}

fn help_text() -> String {
    [
        "\\dt             List tables.",
        "\\d <table>      Describe a table (also \\d+).",
        "\\timing         Toggle display of statement execution time.",
        "\\? (\\h)         Display this help.",
        "\\q              Quit.",
        "",
        "Statements end with ';' and may span several lines.",
    ]
    .join("\n")
}
