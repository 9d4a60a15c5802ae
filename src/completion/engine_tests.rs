use super::suggestion::SuggestionCategory;
use super::*;
use crate::database::fake::FakeDatabase;
use crate::database::Connection;
use crate::database::Database;

fn create_test_db() -> FakeDatabase {
    FakeDatabase::new()
        .with_table("users", &["id", "name"])
        .with_table("orders", &["order_id", "user_id", "amount", "id"])
}

fn candidates(
    engine: &CompletionEngine,
    line: &str,
    prefix: &str,
    schema: &mut SchemaCache,
    db: &dyn Database,
) -> Vec<String> {
    let cycle = engine.begin(line, prefix, schema, db);
    let mut out = Vec::new();
    let mut index = 0;
    while let Some(candidate) = cycle.complete(index) {
        out.push(candidate);
        index += 1;
    }
    out
}

#[test]
fn test_keyword_context() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    let expected: Vec<String> = engine
        .keywords()
        .iter()
        .filter(|k| k.starts_with("S"))
        .map(|k| format!("{} ", k))
        .collect();
    assert_eq!(candidates(&engine, "s", "s", &mut schema, &db), expected);
    assert_eq!(
        candidates(&engine, "SELECT * ", "", &mut schema, &db).len(),
        engine.keywords().len()
    );
    // Keyword completion never touches the database.
    assert_eq!(db.queries(), 0);
}

#[test]
fn test_custom_keyword_order_is_preserved() {
    let engine = CompletionEngine::new(KeywordSet::new(["where", "with", "vacuum", "WINDOW"]));
    let db = create_test_db();
    let mut schema = SchemaCache::new();
    assert_eq!(
        candidates(&engine, "w", "w", &mut schema, &db),
        vec!["WHERE ", "WITH ", "WINDOW "]
    );
}

#[test]
fn test_from_context() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    assert_eq!(
        candidates(&engine, "SELECT * FROM u", "u", &mut schema, &db),
        vec!["users "]
    );
    assert_eq!(
        candidates(&engine, "SELECT * FROM ", "", &mut schema, &db),
        vec!["orders ", "users "]
    );
    assert_eq!(
        candidates(&engine, "select * from U", "U", &mut schema, &db),
        vec!["users "]
    );
}

#[test]
fn test_table_names_fetched_once_per_session() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    candidates(&engine, "SELECT * FROM ", "", &mut schema, &db);
    candidates(&engine, "SELECT * FROM o", "o", &mut schema, &db);
    assert_eq!(db.queries(), 1);
}

#[test]
fn test_where_context() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    assert_eq!(
        candidates(&engine, "SELECT * FROM users WHERE n", "n", &mut schema, &db),
        vec!["name "]
    );
    assert_eq!(
        candidates(&engine, "SELECT * FROM users WHERE ", "", &mut schema, &db),
        vec!["id ", "name "]
    );
}

#[test]
fn test_where_context_unions_mentioned_tables() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    assert_eq!(
        candidates(
            &engine,
            "SELECT * FROM users JOIN orders ON users.id = orders.user_id WHERE ",
            "",
            &mut schema,
            &db
        ),
        vec!["amount ", "id ", "name ", "order_id ", "user_id "]
    );
}

#[test]
fn test_where_without_known_tables() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    assert!(candidates(&engine, "SELECT * FROM ghosts WHERE ", "", &mut schema, &db).is_empty());
}

#[test]
fn test_columns_recomputed_on_every_request() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    let cycle = engine.begin("SELECT * FROM users WHERE ", "", &mut schema, &db);
    assert_eq!(cycle.len(), 2);
    assert_eq!(db.queries(), 2);

    engine.begin("SELECT * FROM users WHERE ", "", &mut schema, &db);
    assert_eq!(db.queries(), 3);
}

#[test]
fn test_lookup_failure_degrades_to_no_candidates() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    db.fail();
    let mut schema = SchemaCache::new();

    assert!(candidates(&engine, "SELECT * FROM ", "", &mut schema, &db).is_empty());
    assert!(candidates(&engine, "SELECT * FROM users WHERE ", "", &mut schema, &db).is_empty());
    // Keyword completion still works.
    assert_eq!(
        candidates(&engine, "SEL", "SEL", &mut schema, &db),
        vec!["SELECT "]
    );
}

#[test]
fn test_short_lines_fall_back_to_keywords() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    assert_eq!(
        candidates(&engine, "FROM u", "u", &mut schema, &db),
        vec!["UPDATE ", "UPSERT "]
    );
    assert_eq!(db.queries(), 0);
}

#[test]
fn test_exhausted_cycle_returns_none() {
    let engine = CompletionEngine::default();
    let db = create_test_db();
    let mut schema = SchemaCache::new();

    let cycle = engine.begin("SELECT * FROM u", "u", &mut schema, &db);
    assert_eq!(cycle.complete(0).as_deref(), Some("users "));
    assert_eq!(cycle.complete(1), None);
    assert_eq!(cycle.complete(7), None);
    assert_eq!(
        cycle.suggestion(0).map(|s| s.category),
        Some(SuggestionCategory::Table)
    );
}

#[test]
fn test_against_sqlite() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute("CREATE TABLE users (id INTEGER, name TEXT)").unwrap();
    conn.execute("CREATE TABLE orders (order_id INTEGER)").unwrap();

    let engine = CompletionEngine::default();
    let mut schema = SchemaCache::new();

    assert_eq!(
        candidates(&engine, "SELECT * FROM ", "", &mut schema, &conn),
        vec!["orders ", "users "]
    );
    assert_eq!(
        candidates(&engine, "SELECT * FROM users WHERE n", "n", &mut schema, &conn),
        vec!["name "]
    );

    // Created after the cache was populated: not offered.
    conn.execute("CREATE TABLE accounts (id INTEGER)").unwrap();
    assert_eq!(
        candidates(&engine, "SELECT * FROM a", "a", &mut schema, &conn),
        Vec::<String>::new()
    );
}
