//! Error types for the export pipeline.
//!
//! Errors fall into two groups. Per-item errors (`Open`, `Catalog`, `Export`)
//! are recorded in the run summary and never stop the run. Run-level errors
//! (`Io` on the source or output directory, `Configuration`) are returned from
//! [`crate::run`] and end the process with a non-zero exit code.

use std::path::Path;
use thiserror::Error;

/// Main error type for dbexport operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Database file could not be opened as a SQLite store
    #[error("Failed to open database {path}")]
    Open {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The store's catalog could not be read
    #[error("Catalog query failed: {context}")]
    Catalog {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading rows from a table failed
    #[error("Export of table '{table}' failed")]
    Export {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing delimited text failed
    #[error("CSV write failed: {context}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results with ExportError
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// Creates an open error for the given database file
    pub fn open_failed<E>(path: &Path, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Open {
            path: path.display().to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a catalog error with context
    pub fn catalog_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Catalog {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a table export error
    pub fn export_failed<E>(table: &str, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Export {
            table: table.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a CSV error with context
    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Renders the error together with its source chain on one line.
    ///
    /// Log lines use this so the underlying driver message (for example
    /// "file is not a database") is visible next to our context.
    pub fn detailed(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
