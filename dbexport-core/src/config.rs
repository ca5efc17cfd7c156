//! Export run configuration.
//!
//! The binary always runs with [`ExportConfig::default`]; the builder methods
//! exist so callers (and tests) can point a run at other directories.

use crate::Result;
use crate::error::ExportError;
use std::path::PathBuf;

/// Default name of the export directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "exports";

/// Default extension recognised as a database file.
pub const DEFAULT_DATABASE_EXTENSION: &str = "db";

/// Default extension of exported artifacts.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "csv";

/// Configuration for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory scanned (non-recursively) for database files
    pub source_dir: PathBuf,
    /// Directory receiving one artifact per table
    pub output_dir: PathBuf,
    /// File extensions (without the dot) treated as database files
    pub database_extensions: Vec<String>,
    /// Extension (without the dot) of each artifact
    pub artifact_extension: String,
    /// Field delimiter of the artifacts
    pub delimiter: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            database_extensions: vec![DEFAULT_DATABASE_EXTENSION.to_string()],
            artifact_extension: DEFAULT_ARTIFACT_EXTENSION.to_string(),
            delimiter: b',',
        }
    }
}

impl ExportConfig {
    /// Creates a new export config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the directory scanned for databases.
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Builder method to set the export directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method to replace the recognised database extensions.
    pub fn with_database_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.database_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the artifact extension.
    pub fn with_artifact_extension(mut self, extension: impl Into<String>) -> Self {
        self.artifact_extension = extension.into();
        self
    }

    /// Builder method to set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns a configuration error if no database extension is set, an
    /// extension is empty or dotted, or the delimiter is a quote or newline.
    pub fn validate(&self) -> Result<()> {
        if self.database_extensions.is_empty() {
            return Err(ExportError::configuration(
                "at least one database extension is required",
            ));
        }

        for extension in self
            .database_extensions
            .iter()
            .chain(std::iter::once(&self.artifact_extension))
        {
            if extension.is_empty() {
                return Err(ExportError::configuration("extensions must not be empty"));
            }
            if extension.contains('.') || extension.contains('/') {
                return Err(ExportError::configuration(format!(
                    "extension '{}' must be given without dots or separators",
                    extension
                )));
            }
        }

        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(ExportError::configuration(
                "delimiter must not be a quote or line break",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("."));
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.database_extensions, vec!["db".to_string()]);
        assert_eq!(config.artifact_extension, "csv");
        assert_eq!(config.delimiter, b',');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ExportConfig::new()
            .with_source_dir("/data")
            .with_output_dir("/data/out")
            .with_database_extensions(["db", "sqlite"])
            .with_artifact_extension("tsv")
            .with_delimiter(b'\t');

        assert_eq!(config.source_dir, PathBuf::from("/data"));
        assert_eq!(config.output_dir, PathBuf::from("/data/out"));
        assert_eq!(config.database_extensions, vec!["db", "sqlite"]);
        assert_eq!(config.artifact_extension, "tsv");
        assert_eq!(config.delimiter, b'\t');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_extensions() {
        let no_extensions = ExportConfig::new().with_database_extensions(Vec::<String>::new());
        assert!(no_extensions.validate().is_err());

        let dotted = ExportConfig::new().with_database_extensions([".db"]);
        assert!(dotted.validate().is_err());

        let empty_artifact = ExportConfig::new().with_artifact_extension("");
        assert!(empty_artifact.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_quote_delimiter() {
        let config = ExportConfig::new().with_delimiter(b'"');
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("delimiter"));
    }
}
