//! The export run: discover, open, list, export, close, next.
//!
//! Open and export failures are logged and recorded in the [`RunSummary`];
//! only an unreadable source directory or an uncreatable output directory
//! ends the run early.

use crate::Result;
use crate::config::ExportConfig;
use crate::discovery::{database_stem, discover_databases};
use crate::error::ExportError;
use crate::export::{artifact_path, export_table};
use crate::models::{DatabaseOutcome, RunSummary, TableOutcome};
use crate::sqlite::{self, SourceDatabase};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Runs one export over `config.source_dir`.
///
/// The output directory is only created once at least one database file has
/// been found.
///
/// # Errors
/// Returns a configuration error for an invalid config, or an I/O error if
/// the source directory cannot be listed or the output directory cannot be
/// created.
pub async fn run(config: &ExportConfig) -> Result<RunSummary> {
    config.validate()?;

    let databases = discover_databases(&config.source_dir, &config.database_extensions).await?;
    if databases.is_empty() {
        info!(
            "No .{} files found in {}",
            config.database_extensions.join(", ."),
            config.source_dir.display()
        );
        return Ok(RunSummary::default());
    }

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| {
            ExportError::io(
                format!(
                    "Failed to create output directory {}",
                    config.output_dir.display()
                ),
                e,
            )
        })?;

    let mut summary = RunSummary::default();
    let mut written = HashSet::new();
    for path in &databases {
        summary
            .databases
            .push(process_database(path, config, &mut written).await);
    }

    info!(
        "Done. {} of {} database(s) read, {} table(s) exported, {} failed",
        summary
            .databases_found()
            .saturating_sub(summary.databases_failed()),
        summary.databases_found(),
        summary.tables_exported(),
        summary.tables_failed()
    );

    Ok(summary)
}

/// Processes one database file. The handle is closed before returning,
/// whatever happened while exporting.
async fn process_database(
    path: &Path,
    config: &ExportConfig,
    written: &mut HashSet<PathBuf>,
) -> DatabaseOutcome {
    let name = display_name(path);
    let stem = database_stem(path);
    info!("Processing database: {}", name);

    let result = match SourceDatabase::open(path).await {
        Ok(db) => {
            let result = export_database(&db, &stem, config, written).await;
            db.close().await;
            result
        }
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        error!("  ERROR: could not open {}: {}", name, e.detailed());
    }

    DatabaseOutcome {
        path: path.to_path_buf(),
        stem,
        result,
    }
}

/// Exports every table of an open database, continuing past failed tables.
async fn export_database(
    db: &SourceDatabase,
    stem: &str,
    config: &ExportConfig,
    written: &mut HashSet<PathBuf>,
) -> Result<Vec<TableOutcome>> {
    // A catalog that cannot be read means the file is not a usable store.
    let tables = sqlite::list_tables(db)
        .await
        .map_err(|e| ExportError::open_failed(db.path(), e))?;

    if tables.is_empty() {
        info!("  (no tables found)");
        return Ok(Vec::new());
    }

    let mut outcomes = Vec::with_capacity(tables.len());
    for table in tables {
        let dest = artifact_path(
            &config.output_dir,
            stem,
            &table,
            &config.artifact_extension,
        );
        info!("  Exporting: {} -> {}", table, dest.display());
        if !record_artifact(written, &dest) {
            warn!(
                "    {} was already written in this run and will be overwritten",
                dest.display()
            );
        }

        let result = export_table(db, &table, &dest, config.delimiter).await;
        match &result {
            Ok(export) => debug!(
                "    {} column(s), {} row(s) written",
                export.columns, export.rows
            ),
            Err(e) => error!("    ERROR exporting {}: {}", table, e.detailed()),
        }

        outcomes.push(TableOutcome { table, result });
    }

    Ok(outcomes)
}

/// Remembers `dest`; false when an earlier table in the run mapped to it too.
fn record_artifact(written: &mut HashSet<PathBuf>, dest: &Path) -> bool {
    written.insert(dest.to_path_buf())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
