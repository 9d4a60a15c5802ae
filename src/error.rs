use thiserror::Error;

/// Errors surfaced by the database collaborator.
///
/// All of them are recoverable per statement except `Open`, which is only
/// produced while the session is being set up.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("unable to open database \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("no such table: {0}")]
    NoSuchTable(String),
}

pub type DbResult<T> = std::result::Result<T, DbError>;
