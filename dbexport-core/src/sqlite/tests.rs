//! Unit tests for the SQLite layer.
//!
//! These tests verify:
//! - Read-only opening and open failures
//! - Table enumeration and reserved-name filtering
//! - Column enumeration for empty tables
//! - Cell decoding by storage class

use super::{SourceDatabase, decode_row, list_tables, table_columns};
use crate::error::ExportError;
use crate::models::CellValue;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a database file at `dir/name` and runs `statements` against it.
async fn create_database(dir: &TempDir, name: &str, statements: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    for statement in statements {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;
    path
}

// =============================================================================
// Connection Tests
// =============================================================================

#[tokio::test]
async fn test_open_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database(&dir, "shop.db", &["CREATE TABLE t (a)"]).await;

    let db = SourceDatabase::open(&path).await.unwrap();
    assert_eq!(db.path(), path.as_path());
    assert_eq!(list_tables(&db).await.unwrap(), vec!["t".to_string()]);
    db.close().await;
}

#[tokio::test]
async fn test_open_missing_file_does_not_create_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");

    let result = SourceDatabase::open(&path).await;
    assert!(matches!(result, Err(ExportError::Open { .. })));
    assert!(!path.exists(), "open must never create a database file");
}

#[tokio::test]
async fn test_open_is_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database(&dir, "shop.db", &["CREATE TABLE t (a)"]).await;

    let db = SourceDatabase::open(&path).await.unwrap();
    let write = sqlx::query("INSERT INTO t VALUES (1)")
        .execute(db.pool())
        .await;
    assert!(write.is_err(), "writes must be rejected");
    db.close().await;
}

#[tokio::test]
async fn test_catalog_of_non_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.db");
    std::fs::write(&path, "this is not a sqlite database\n".repeat(64)).unwrap();

    // Depending on when SQLite reads the header, either step reports it.
    match SourceDatabase::open(&path).await {
        Ok(db) => {
            let result = list_tables(&db).await;
            assert!(matches!(result, Err(ExportError::Catalog { .. })));
            db.close().await;
        }
        Err(e) => assert!(matches!(e, ExportError::Open { .. })),
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

#[tokio::test]
async fn test_list_tables_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database(
        &dir,
        "shop.db",
        &[
            "CREATE TABLE products (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)",
            "CREATE TABLE orders (id INTEGER, total REAL)",
            "INSERT INTO products (name) VALUES ('widget')",
            "CREATE VIEW big_orders AS SELECT * FROM orders WHERE total > 100",
            "CREATE INDEX idx_orders_total ON orders (total)",
        ],
    )
    .await;

    let db = SourceDatabase::open(&path).await.unwrap();
    let tables = list_tables(&db).await.unwrap();
    db.close().await;

    // sqlite_sequence exists because of AUTOINCREMENT but is reserved
    assert_eq!(tables, vec!["orders".to_string(), "products".to_string()]);
}

#[tokio::test]
async fn test_list_tables_empty_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database(&dir, "empty.db", &["PRAGMA user_version = 1"]).await;

    let db = SourceDatabase::open(&path).await.unwrap();
    assert!(list_tables(&db).await.unwrap().is_empty());
    db.close().await;
}

#[tokio::test]
async fn test_table_columns_in_declaration_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database(
        &dir,
        "shop.db",
        &[
            "CREATE TABLE items (sku TEXT, qty INTEGER, price REAL, total REAL GENERATED ALWAYS AS (qty * price))",
            "CREATE TABLE \"it's\" (\"a b\" TEXT)",
        ],
    )
    .await;

    let db = SourceDatabase::open(&path).await.unwrap();
    assert_eq!(
        table_columns(&db, "items").await.unwrap(),
        vec!["sku", "qty", "price", "total"]
    );
    assert_eq!(table_columns(&db, "it's").await.unwrap(), vec!["a b"]);
    db.close().await;
}

// =============================================================================
// Cell Decoding Tests
// =============================================================================

#[tokio::test]
async fn test_decode_by_storage_class() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_database(
        &dir,
        "types.db",
        &[
            "CREATE TABLE mixed (a INTEGER, b)",
            "INSERT INTO mixed VALUES (NULL, 42)",
            "INSERT INTO mixed VALUES ('not a number', 2.5)",
            "INSERT INTO mixed VALUES (7, X'00FF')",
        ],
    )
    .await;

    let db = SourceDatabase::open(&path).await.unwrap();
    let rows = sqlx::query("SELECT * FROM mixed ORDER BY rowid")
        .fetch_all(db.pool())
        .await
        .unwrap();
    let decoded: Vec<Vec<CellValue>> = rows.iter().map(|row| decode_row(row).unwrap()).collect();
    db.close().await;

    assert_eq!(
        decoded,
        vec![
            vec![CellValue::Null, CellValue::Integer(42)],
            vec![
                CellValue::Text("not a number".to_string()),
                CellValue::Real(2.5)
            ],
            vec![CellValue::Integer(7), CellValue::Blob(vec![0x00, 0xFF])],
        ]
    );
}
