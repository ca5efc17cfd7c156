//! Core library for dbexport.
//!
//! Finds SQLite database files in a directory, lists their user tables and
//! writes every table to its own CSV file. The binary is a thin wrapper around
//! [`run`].
//!
//! # Guarantees
//! - Database files are opened read-only; no statement other than SELECT or
//!   PRAGMA is ever issued
//! - A file that cannot be opened, or a table that cannot be exported, is
//!   logged and skipped without stopping the run
//! - Each database handle is closed before the next file is opened
//!
//! # Architecture
//! - [`discovery`]: candidate files in one directory, sorted
//! - [`sqlite`]: read-only handle, catalog reader, cell decoding
//! - [`export`]: one table to one delimited-text artifact
//! - [`runner`]: the sequential loop collecting a [`RunSummary`]

pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod runner;
pub mod sqlite;

// Re-export commonly used types
pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use logging::init_logging;
pub use models::{CellValue, DatabaseOutcome, RunSummary, TableExport, TableOutcome};
pub use runner::run;
pub use sqlite::SourceDatabase;
