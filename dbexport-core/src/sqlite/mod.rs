//! Read-only access to SQLite database files.
//!
//! # Module Structure
//! - `connection`: Opening and closing a database file
//! - `catalog`: Table and column enumeration via `sqlite_master` and PRAGMA
//! - `values`: Decoding result cells into [`CellValue`](crate::models::CellValue)
//!
//! # Guarantees
//! - Files are opened read-only and never created
//! - Only SELECT and PRAGMA statements are issued

pub mod catalog;
pub mod connection;
pub mod values;

#[cfg(test)]
mod tests;

use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

pub use catalog::{RESERVED_PREFIX, list_tables, table_columns};
pub use values::{column_names, decode_cell, decode_row};

/// An open database file.
///
/// Holds a single-connection pool. Call [`SourceDatabase::close`] when done;
/// the run loop does so on every path before moving to the next file.
pub struct SourceDatabase {
    pool: SqlitePool,
    path: PathBuf,
}

impl std::fmt::Debug for SourceDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDatabase")
            .field("path", &self.path)
            .field("closed", &self.pool.is_closed())
            .finish_non_exhaustive()
    }
}

impl SourceDatabase {
    /// Path the database was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Quotes an identifier for use in SQL, doubling embedded double quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
