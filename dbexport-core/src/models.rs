//! Data model shared by the catalog reader, the exporter and the run loop.

use crate::Result;
use base64::Engine;
use std::path::PathBuf;

/// Prefix marking a BLOB rendered as base64 text.
pub const BLOB_PREFIX: &str = "base64:";

/// One cell of a result row, decoded from its runtime SQLite storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// IEEE 754 double
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes, including text that is not valid UTF-8
    Blob(Vec<u8>),
}

impl CellValue {
    /// Renders the cell as a CSV field.
    ///
    /// NULL becomes an empty field, reals always carry a fractional part or an
    /// exponent (`1.0`, `1e100`), and BLOBs become `base64:` + standard base64.
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Integer(value) => value.to_string(),
            Self::Real(value) => format!("{:?}", value),
            Self::Text(value) => value.clone(),
            Self::Blob(bytes) => format!(
                "{}{}",
                BLOB_PREFIX,
                base64::engine::general_purpose::STANDARD.encode(bytes)
            ),
        }
    }
}

/// A finished table export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExport {
    /// Path of the written artifact
    pub artifact: PathBuf,
    /// Number of header fields written
    pub columns: usize,
    /// Number of data records written
    pub rows: u64,
}

/// Result of exporting one table.
#[derive(Debug)]
pub struct TableOutcome {
    /// Table name as stored in the catalog
    pub table: String,
    /// Finished export, or why it failed
    pub result: Result<TableExport>,
}

/// Result of processing one database file.
///
/// `result` is an error when the file could not be opened or its catalog
/// could not be read; otherwise it holds one outcome per table.
#[derive(Debug)]
pub struct DatabaseOutcome {
    /// Path of the database file
    pub path: PathBuf,
    /// File name without extension, used in artifact names
    pub stem: String,
    /// Per-table outcomes, or the open failure
    pub result: Result<Vec<TableOutcome>>,
}

impl DatabaseOutcome {
    /// Table outcomes, empty when the database failed to open.
    pub fn tables(&self) -> &[TableOutcome] {
        self.result.as_deref().unwrap_or_default()
    }
}

/// Everything one run did, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// One outcome per discovered database file
    pub databases: Vec<DatabaseOutcome>,
}

impl RunSummary {
    /// Number of database files discovered.
    pub fn databases_found(&self) -> usize {
        self.databases.len()
    }

    /// Number of database files skipped because they could not be opened.
    pub fn databases_failed(&self) -> usize {
        self.databases.iter().filter(|db| db.result.is_err()).count()
    }

    /// Number of tables exported completely.
    pub fn tables_exported(&self) -> usize {
        self.table_outcomes().filter(|t| t.result.is_ok()).count()
    }

    /// Number of tables whose export failed.
    pub fn tables_failed(&self) -> usize {
        self.table_outcomes().filter(|t| t.result.is_err()).count()
    }

    /// Paths of all completed artifacts.
    pub fn artifacts(&self) -> Vec<&PathBuf> {
        self.table_outcomes()
            .filter_map(|t| t.result.as_ref().ok())
            .map(|export| &export.artifact)
            .collect()
    }

    fn table_outcomes(&self) -> impl Iterator<Item = &TableOutcome> {
        self.databases.iter().flat_map(DatabaseOutcome::tables)
    }
}
