//! Catalog reading.
//!
//! - `sqlite_master`: names of user tables
//! - `PRAGMA table_xinfo()`: column names, including generated columns

use super::SourceDatabase;
use crate::Result;
use crate::error::ExportError;
use sqlx::Row;

/// Name prefix SQLite reserves for its own bookkeeping tables.
pub const RESERVED_PREFIX: &str = "sqlite_";

/// Lists user-defined tables, sorted by name.
///
/// Views, indexes and triggers are not tables and are skipped, as is every
/// table whose name matches `sqlite_%` (for example `sqlite_sequence`).
///
/// # Errors
/// Returns [`ExportError::Catalog`] if `sqlite_master` cannot be read, which
/// is how a file that is not a database usually shows up.
pub async fn list_tables(db: &SourceDatabase) -> Result<Vec<String>> {
    let tables_query = format!(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
        AND name NOT LIKE '{}%'
        ORDER BY name
    "#,
        RESERVED_PREFIX
    );

    let tables: Vec<String> = sqlx::query_scalar(&tables_query)
        .fetch_all(db.pool())
        .await
        .map_err(|e| ExportError::catalog_failed("Failed to enumerate tables", e))?;

    tracing::debug!(
        "Found {} table(s) in {}",
        tables.len(),
        db.path().display()
    );
    Ok(tables)
}

/// Returns the column names of `table` in the order `SELECT *` yields them.
///
/// Hidden columns of virtual tables (`hidden = 1`) are left out because
/// `SELECT *` leaves them out too; generated columns (`hidden` 2 or 3) stay.
///
/// # Errors
/// Returns [`ExportError::Catalog`] if the PRAGMA fails.
pub async fn table_columns(db: &SourceDatabase, table: &str) -> Result<Vec<String>> {
    let columns_query = format!("PRAGMA table_xinfo('{}')", table.replace('\'', "''"));

    let rows = sqlx::query(&columns_query)
        .fetch_all(db.pool())
        .await
        .map_err(|e| {
            ExportError::catalog_failed(format!("Failed to read columns of table '{}'", table), e)
        })?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        let hidden: i64 = row.try_get("hidden").unwrap_or(0);
        if hidden == 1 {
            continue;
        }
        let name: String = row.try_get("name").map_err(|e| {
            ExportError::catalog_failed(format!("Failed to parse column of table '{}'", table), e)
        })?;
        columns.push(name);
    }

    Ok(columns)
}
