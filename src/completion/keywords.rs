/*!
 * Statement keywords recognised for completion and highlighting
 */

use regex::Regex;

/// Keywords offered in plain completion context, in offer order.
pub const SQLITE_KEYWORDS: &[&str] = &[
    "ALTER",
    "AND",
    "ATTACH",
    "BEGIN",
    "BY",
    "COMMIT",
    "CONFLICT",
    "CREATE",
    "DATABASE",
    "DELETE",
    "DETACH",
    "DROP",
    "END",
    "EXPLAIN",
    "FROM",
    "HAVING",
    "INDEX",
    "INDEXED",
    "INNER",
    "INSERT",
    "JOIN",
    "LEFT",
    "LIMIT",
    "ON",
    "OR",
    "OUTER",
    "PRAGMA",
    "REINDEX",
    "RELEASE",
    "REPLACE",
    "RIGHT",
    "ROLLBACK",
    "SAVEPOINT",
    "SELECT",
    "TABLE",
    "TRANSACTION",
    "TRIGGER",
    "UPDATE",
    "UPSERT",
    "VACUUM",
    "VIEW",
    "VIRTUAL",
    "WHERE",
    "WITH",
];

/// Fixed, ordered set of uppercase keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    /// Build a set from any casing; duplicates keep their first position.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            if !word.is_empty() && !set.contains(&word) {
                set.push(word);
            }
        }
        Self { words: set }
    }

    pub fn sqlite() -> Self {
        Self::new(SQLITE_KEYWORDS)
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_uppercase();
        self.words.iter().any(|w| *w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Keywords starting with `prefix`, ignoring case.
    pub fn starting_with<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = prefix.to_uppercase();
        self.iter().filter(move |w| w.starts_with(&prefix))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Pattern matching any keyword written in uppercase as a whole word.
    pub fn highlight_pattern(&self) -> Result<Regex, regex::Error> {
        let alternation = self
            .words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b(?:{})\b", alternation))
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::sqlite()
    }
}
