/*!
 * SQLite completion helper
 *
 * Main interface integrating the completion engine with rustyline
 */

use super::classifier::Position;
use super::engine::CompletionEngine;
use crate::session::Session;
use regex::Regex;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline::hint::{Hint, Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::Context;
use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Inline hint; context hints are display-only and never inserted.
pub struct SqlHint {
    display: String,
    completion: Option<String>,
}

impl Hint for SqlHint {
    fn display(&self) -> &str {
        &self.display
    }

    fn completion(&self) -> Option<&str> {
        self.completion.as_deref()
    }
}

/// SQLite Helper (integrating all functionality)
pub struct SqliteHelper {
    engine: CompletionEngine,
    session: Arc<Mutex<Session>>,
    keyword_pattern: Option<Regex>,
    highlighter: MatchingBracketHighlighter,
    hinter: HistoryHinter,
}

impl SqliteHelper {
    /// Create helper with shared session
    pub fn new(engine: CompletionEngine, session: Arc<Mutex<Session>>) -> Self {
        let keyword_pattern = match engine.keywords().highlight_pattern() {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                debug!(error = %e, "keyword highlighting disabled");
                None
            }
        };

        debug!(keywords = engine.keywords().len(), "completion helper ready");

        Self {
            engine,
            session,
            keyword_pattern,
            highlighter: MatchingBracketHighlighter::new(),
            hinter: HistoryHinter::new(),
        }
    }

    /// Get current word start position
    fn get_word_start(&self, line: &str, pos: usize) -> usize {
        line[..pos]
            .char_indices()
            .rev()
            .find(|&(_, c)| c.is_whitespace() || c == '(' || c == ',' || c == '.' || c == ';')
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }
}

impl Completer for SqliteHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let start = self.get_word_start(line, pos);
        let prefix = &line[start..pos];

        // The driver never holds the session while reading; a busy or
        // poisoned lock just means no candidates.
        let mut session = match self.session.try_lock() {
            Ok(session) => session,
            Err(_) => return Ok((start, Vec::new())),
        };
        let (schema, db) = session.schema_and_db();
        let cycle = self.engine.begin(line, prefix, schema, db);
        if cycle.is_empty() {
            return Ok((start, Vec::new()));
        }

        let mut completions = Vec::with_capacity(cycle.len());
        let mut index = 0;
        while let Some(replacement) = cycle.complete(index) {
            let display = cycle
                .suggestion(index)
                .map(|s| s.format_display())
                .unwrap_or_else(|| replacement.trim_end().to_string());
            completions.push(Pair {
                display,
                replacement,
            });
            index += 1;
        }

        Ok((start, completions))
    }
}

impl Hinter for SqliteHelper {
    type Hint = SqlHint;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<SqlHint> {
        // First try history hints
        if let Some(history_hint) = self.hinter.hint(line, pos, ctx) {
            return Some(SqlHint {
                display: history_hint.clone(),
                completion: Some(history_hint),
            });
        }

        if pos < line.len() || !line.ends_with(char::is_whitespace) {
            return None;
        }

        let display = match self.engine.context(line, "").position() {
            Position::TableName => "💡 Enter table name (press Tab to see all options)",
            Position::ColumnName => "💡 Enter column name (press Tab for suggestions)",
            Position::Keyword => return None,
        };

        Some(SqlHint {
            display: display.to_string(),
            completion: None,
        })
    }
}

impl Highlighter for SqliteHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match &self.keyword_pattern {
            Some(pattern) => pattern.replace_all(line, "\x1b[1m$0\x1b[0m"),
            None => Cow::Borrowed(line),
        }
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Borrowed(prompt)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}

// Statements are accumulated line by line by the driver, so every line is
// accepted as typed.
impl Validator for SqliteHelper {}

impl rustyline::Helper for SqliteHelper {}
