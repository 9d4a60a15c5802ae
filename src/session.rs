use crate::completion::SchemaCache;
use crate::database::Database;
use std::path::Path;

/// Mutable state of one REPL session, shared between the driver loop and
/// the completion helper.
pub struct Session {
    db: Box<dyn Database + Send>,
    schema: SchemaCache,
    timing: bool,
    statements: u64,
    name: String,
}

impl Session {
    pub fn new(db: Box<dyn Database + Send>, path: impl AsRef<Path>, timing: bool) -> Self {
        Self {
            db,
            schema: SchemaCache::new(),
            timing,
            statements: 0,
            name: display_name(path.as_ref()),
        }
    }

    pub fn db(&self) -> &dyn Database {
        &*self.db
    }

    pub fn schema_and_db(&mut self) -> (&mut SchemaCache, &dyn Database) {
        (&mut self.schema, &*self.db)
    }

    pub fn timing(&self) -> bool {
        self.timing
    }

    /// Flip the timing flag, returning the new state.
    pub fn toggle_timing(&mut self) -> bool {
        self.timing = !self.timing;
        self.timing
    }

    /// Count one more evaluated input and return its number.
    pub fn next_statement(&mut self) -> u64 {
        self.statements += 1;
        self.statements
    }

    /// Primary prompt, e.g. `shop => ` or `shop (in txn) => `.
    pub fn prompt(&self) -> String {
        let txn = if self.db.in_transaction() {
            "(in txn) "
        } else {
            ""
        };
        format!("{} {}=> ", self.name, txn)
    }
}

/// File name of the database up to its first `.`.
fn display_name(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    file.split('.').next().unwrap_or_default().to_string()
}
