//! Database file discovery.
//!
//! Scans a single directory (never recursing) for regular files whose
//! extension is one of the configured database extensions.

use crate::Result;
use crate::error::ExportError;
use std::path::{Path, PathBuf};

/// Returns the database files in `dir`, sorted lexicographically by path.
///
/// Extension matching is exact and case-sensitive. An empty result is not an
/// error.
///
/// # Errors
/// Returns an I/O error if the directory cannot be listed.
pub async fn discover_databases(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ExportError::io(format!("Failed to read directory {}", dir.display()), e))?;

    let mut found = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ExportError::io(format!("Failed to read directory {}", dir.display()), e))?
    {
        let path = entry.path();
        if !has_database_extension(&path, extensions) {
            continue;
        }

        // Follows symlinks so a linked database still counts as a file
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => found.push(path),
            Ok(_) => tracing::trace!("Skipping non-file entry {}", path.display()),
            Err(e) => tracing::debug!("Skipping unreadable entry {}: {}", path.display(), e),
        }
    }

    found.sort();
    tracing::debug!(
        "Discovered {} database file(s) in {}",
        found.len(),
        dir.display()
    );
    Ok(found)
}

/// Checks whether `path` ends in one of `extensions`.
pub fn has_database_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Database name used in artifact file names: the file name without its
/// final extension.
pub fn database_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
