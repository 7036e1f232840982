use crate::config::DatabaseConfig;
use crate::database::{Store, release, run_migrations};
use sea_orm::ConnectionTrait;
use tempfile::TempDir;

/// Tables as the first deployment created them, before collateral, loan
/// type and interest rate existed.
pub const LEGACY_SCHEMA: [&str; 3] = [
    "CREATE TABLE employees (id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT UNIQUE, password TEXT)",
    "CREATE TABLE customers (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, phone TEXT UNIQUE)",
    "CREATE TABLE loans (id INTEGER PRIMARY KEY AUTOINCREMENT, customer_id INTEGER, amount REAL, \
     date TEXT, duration INTEGER, status TEXT, FOREIGN KEY (customer_id) REFERENCES customers (id))",
];

fn temp_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        path: dir
            .path()
            .join("database")
            .join("microfinance.db")
            .to_string_lossy()
            .into_owned(),
    };
    let store = Store::from_config(&config).unwrap();
    (dir, store)
}

/// Fresh migrated database in a temporary directory. Keep the `TempDir`
/// alive for as long as the store is used.
pub async fn test_store() -> (TempDir, Store) {
    let (dir, store) = temp_store();
    run_migrations(&store).await.unwrap();
    (dir, store)
}

/// Unmigrated database prepared with raw `statements`, standing in for a
/// file written by an earlier deployment.
pub async fn legacy_store(statements: &[&str]) -> (TempDir, Store) {
    let (dir, store) = temp_store();
    let conn = store.connect().await.unwrap();
    for sql in statements {
        conn.execute_unprepared(sql).await.unwrap();
    }
    release(conn, Ok(())).await.unwrap();
    (dir, store)
}
