//! Table export to delimited text.
//!
//! Each table becomes one artifact: a header record with the column names in
//! result order, then one record per row. Fields are quoted only when needed
//! and every record ends in `\n`.

use crate::Result;
use crate::error::ExportError;
use crate::models::TableExport;
use crate::sqlite::{self, SourceDatabase, quote_identifier};
use futures::TryStreamExt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Builds the artifact path `<output_dir>/<stem>_<table>.<extension>`.
///
/// Path separators in the table name are replaced with `_` so the artifact
/// always lands directly inside `output_dir`. Distinct names can therefore
/// map to the same path (`a/b` and `a_b`); the later table overwrites the
/// earlier one and the run loop warns about it.
pub fn artifact_path(output_dir: &Path, stem: &str, table: &str, extension: &str) -> PathBuf {
    let table: String = table
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    output_dir.join(format!("{}_{}.{}", stem, table, extension))
}

/// Exports every row of `table` to `dest`, creating or truncating it.
///
/// The query runs before the file is created, so a table that cannot be read
/// at all leaves no artifact behind. A failure after the first row leaves a
/// partial file in place.
///
/// # Errors
/// Returns [`ExportError::Export`] if reading fails and
/// [`ExportError::Csv`] or [`ExportError::Io`] if writing fails.
pub async fn export_table(
    db: &SourceDatabase,
    table: &str,
    dest: &Path,
    delimiter: u8,
) -> Result<TableExport> {
    let query = format!("SELECT * FROM {}", quote_identifier(table));
    tracing::debug!("Executing: {}", query);

    let mut rows = sqlx::query(&query).fetch(db.pool());

    let Some(first) = rows
        .try_next()
        .await
        .map_err(|e| ExportError::export_failed(table, e))?
    else {
        // No row carries the column metadata; ask the catalog instead.
        drop(rows);
        let header = sqlite::table_columns(db, table)
            .await
            .map_err(|e| ExportError::export_failed(table, e))?;
        let mut writer = create_writer(dest, delimiter)?;
        write_record(&mut writer, dest, &header)?;
        finish(writer, dest)?;
        return Ok(TableExport {
            artifact: dest.to_path_buf(),
            columns: header.len(),
            rows: 0,
        });
    };

    let header = sqlite::column_names(&first);
    let mut writer = create_writer(dest, delimiter)?;
    write_record(&mut writer, dest, &header)?;

    let mut count: u64 = 0;
    let mut next = Some(first);
    while let Some(row) = next {
        let cells = sqlite::decode_row(&row).map_err(|e| ExportError::export_failed(table, e))?;
        let fields: Vec<String> = cells.iter().map(|cell| cell.render()).collect();
        write_record(&mut writer, dest, &fields)?;
        count = count.saturating_add(1);

        next = rows
            .try_next()
            .await
            .map_err(|e| ExportError::export_failed(table, e))?;
    }

    finish(writer, dest)?;
    tracing::trace!("Wrote {} row(s) of '{}'", count, table);

    Ok(TableExport {
        artifact: dest.to_path_buf(),
        columns: header.len(),
        rows: count,
    })
}

fn create_writer(dest: &Path, delimiter: u8) -> Result<csv::Writer<File>> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(dest)
        .map_err(|e| ExportError::csv(format!("Failed to create {}", dest.display()), e))
}

fn write_record(writer: &mut csv::Writer<File>, dest: &Path, fields: &[String]) -> Result<()> {
    writer
        .write_record(fields)
        .map_err(|e| ExportError::csv(format!("Failed to write to {}", dest.display()), e))
}

fn finish(mut writer: csv::Writer<File>, dest: &Path) -> Result<()> {
    writer
        .flush()
        .map_err(|e| ExportError::io(format!("Failed to flush {}", dest.display()), e))
}
