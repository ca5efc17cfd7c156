//! Opening and closing database files.
//!
//! SQLite needs no pooling here: every file gets one connection, opened in
//! read-only mode with `create_if_missing` off so a vanished file is an open
//! failure rather than a freshly created empty store.

use super::SourceDatabase;
use crate::Result;
use crate::error::ExportError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

/// How long to wait for the single connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

impl SourceDatabase {
    /// Opens a database file read-only.
    ///
    /// Opening succeeds for any file SQLite accepts; files that are not
    /// databases usually only fail on the first query, which is why the run
    /// loop treats a catalog failure as an open failure too.
    ///
    /// # Errors
    /// Returns [`ExportError::Open`] if the connection cannot be established.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| ExportError::open_failed(path, e))?;

        tracing::debug!("Opened {} read-only", path.display());

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Closes the connection and waits for it to be released.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::trace!("Closed {}", self.path.display());
    }
}
