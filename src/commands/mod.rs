pub mod meta;
pub mod query;

pub use meta::{MetaCommand, MetaOutcome};
pub use query::QueryExecutor;
