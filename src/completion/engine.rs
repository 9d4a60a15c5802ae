/*!
 * Completion engine
 *
 * Turns the line being edited and the partial word under the cursor into
 * an ordered candidate list:
 * - After `FROM`: table names from the schema cache
 * - After `WHERE`: columns of the tables named on the line
 * - Anywhere else: keywords
 */

use super::classifier::{classify, CompletionContext, Position};
use super::keywords::KeywordSet;
use super::metadata::SchemaCache;
use super::suggestion::Suggestion;
use crate::database::Database;
use crate::error::DbResult;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

/// Deadline for schema queries issued while the user waits on a Tab press.
pub const COMPLETION_QUERY_TIMEOUT: Duration = Duration::from_millis(250);

pub struct CompletionEngine {
    keywords: KeywordSet,
}

/// Candidates for one completion cycle (same line, same prefix).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionCycle {
    suggestions: Vec<Suggestion>,
}

impl CompletionCycle {
    /// Candidate number `index`, or `None` once the list is exhausted.
    pub fn complete(&self, index: usize) -> Option<String> {
        self.suggestions.get(index).map(Suggestion::replacement)
    }

    pub fn suggestion(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

impl CompletionEngine {
    pub fn new(keywords: KeywordSet) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn context(&self, line: &str, prefix: &str) -> CompletionContext {
        classify(line, prefix, &self.keywords)
    }

    /// Compute the candidate list once for a completion cycle.
    pub fn begin(
        &self,
        line: &str,
        prefix: &str,
        schema: &mut SchemaCache,
        db: &dyn Database,
    ) -> CompletionCycle {
        let context = self.context(line, prefix);
        let position = context.position();
        debug!(
            ?position,
            prefix,
            keyword = ?context.preceding_keyword,
            token = context.token_position,
            "completing"
        );

        let suggestions = match position {
            Position::TableName => self.table_suggestions(&context, schema, db),
            Position::ColumnName => self.column_suggestions(&context, schema, db),
            Position::Keyword => self.keyword_suggestions(prefix),
        };

        CompletionCycle { suggestions }
    }

    fn keyword_suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        self.keywords
            .starting_with(prefix)
            .map(Suggestion::keyword)
            .collect()
    }

    fn table_suggestions(
        &self,
        context: &CompletionContext,
        schema: &mut SchemaCache,
        db: &dyn Database,
    ) -> Vec<Suggestion> {
        let tables = match with_deadline(db, || schema.list_tables(db).map(<[String]>::to_vec)) {
            Ok(tables) => tables,
            Err(e) => {
                debug!(error = %e, "table lookup failed during completion");
                return Vec::new();
            }
        };

        tables
            .into_iter()
            .filter(|table| starts_with_ignore_case(table, &context.prefix))
            .map(Suggestion::table)
            .collect()
    }

    fn column_suggestions(
        &self,
        context: &CompletionContext,
        schema: &mut SchemaCache,
        db: &dyn Database,
    ) -> Vec<Suggestion> {
        let tables = match with_deadline(db, || schema.list_tables(db).map(<[String]>::to_vec)) {
            Ok(tables) => tables,
            Err(e) => {
                debug!(error = %e, "table lookup failed during completion");
                return Vec::new();
            }
        };

        let mut columns = BTreeSet::new();
        for table in tables.iter().filter(|t| context.mentions(t)) {
            match with_deadline(db, || schema.columns_for(db, table)) {
                Ok(names) => columns.extend(names),
                Err(e) => {
                    debug!(table = %table, error = %e, "column lookup failed during completion");
                }
            }
        }

        columns
            .into_iter()
            .filter(|column| starts_with_ignore_case(column, &context.prefix))
            .map(Suggestion::column)
            .collect()
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new(KeywordSet::sqlite())
    }
}

fn with_deadline<T>(db: &dyn Database, lookup: impl FnOnce() -> DbResult<T>) -> DbResult<T> {
    db.set_query_deadline(Some(COMPLETION_QUERY_TIMEOUT));
    let result = lookup();
    db.set_query_deadline(None);
    result
}

fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate.to_uppercase().starts_with(&prefix.to_uppercase())
}
