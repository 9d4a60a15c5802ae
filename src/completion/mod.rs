/*!
 * SQLite CLI Rust - completion module
 *
 * Provides readline-style tab completion:
 * - Statement keyword completion
 * - Table names after FROM
 * - Column names after WHERE, drawn from the tables on the line
 */

pub mod classifier;
pub mod engine;
pub mod helper;
pub mod keywords;
pub mod metadata;
pub mod suggestion;

#[cfg(test)]
mod engine_tests;

// Re-export main interfaces
pub use engine::CompletionEngine;
pub use helper::SqliteHelper;
pub use keywords::KeywordSet;
pub use metadata::SchemaCache;
