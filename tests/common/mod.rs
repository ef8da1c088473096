use course_reviews::{course_review_schema, SqliteConfig};
use rusqlite::Connection;

// Helper function to create an in-memory database with the course/review schema
pub fn create_test_db() -> Connection {
    init_tracing();
    SqliteConfig::in_memory(course_review_schema())
        .open()
        .unwrap()
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
