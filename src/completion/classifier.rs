/*!
 * Token classifier
 *
 * Decides, from the line being edited, what kind of word is being typed.
 * This is a token heuristic, not a grammar.
 */

use super::keywords::KeywordSet;

/// Appended to the line so the word under the cursor is always a token.
const SENTINEL: char = '|';

/// Lines with fewer tokens never get schema-aware completion.
const MIN_SCHEMA_TOKENS: usize = 3;

/// Grammatical position of the word under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Keyword,
    /// Directly after `FROM`
    TableName,
    /// Directly after `WHERE`
    ColumnName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    /// Partial word as typed, original case.
    pub prefix: String,
    /// Nearest keyword scanning backwards from the end of the line.
    pub preceding_keyword: Option<String>,
    /// Index of the current word among the whitespace-split tokens.
    pub token_position: usize,
    tokens: Vec<String>,
}

impl CompletionContext {
    pub fn position(&self) -> Position {
        if self.tokens.len() < MIN_SCHEMA_TOKENS {
            return Position::Keyword;
        }

        match self.tokens[self.tokens.len() - 2].as_str() {
            "FROM" => Position::TableName,
            "WHERE" => Position::ColumnName,
            _ => Position::Keyword,
        }
    }

    /// Whether `table` appears as a token on the line.
    pub fn mentions(&self, table: &str) -> bool {
        let table = table.to_uppercase();
        self.tokens
            .iter()
            .map(|t| t.trim_matches(|c: char| matches!(c, ',' | ';' | '(' | ')' | '"' | '`')))
            .any(|t| t == table)
    }
}

/// Build the completion context for `line` with `prefix` under the cursor.
pub fn classify(line: &str, prefix: &str, keywords: &KeywordSet) -> CompletionContext {
    let mut text = line.to_string();
    text.push(SENTINEL);

    let tokens: Vec<String> = text
        .to_uppercase()
        .split_whitespace()
        .map(String::from)
        .collect();

    let preceding_keyword = tokens
        .iter()
        .rev()
        .find(|t| keywords.contains(t))
        .cloned();

    CompletionContext {
        prefix: prefix.to_string(),
        preceding_keyword,
        token_position: tokens.len().saturating_sub(1),
        tokens,
    }
}
