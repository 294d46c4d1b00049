//! Error types for dataset ingestion.

use std::path::PathBuf;

use roster_model::DatasetKind;
use thiserror::Error;

/// Errors that can occur while discovering or reading datasets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File starts with a byte-order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    #[error("CSV file {path} has an empty column name at position {position}")]
    EmptyColumnName { path: PathBuf, position: usize },

    // === Discovery Errors ===
    /// More than one file in the directory matches the same dataset.
    #[error("several files match the {kind} dataset: {}", display_paths(.paths))]
    AmbiguousDataset {
        kind: DatasetKind,
        paths: Vec<PathBuf>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/clients.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /data/clients.csv");

        let err = IngestError::AmbiguousDataset {
            kind: DatasetKind::Tasks,
            paths: vec![PathBuf::from("tasks.csv"), PathBuf::from("tasks_v2.csv")],
        };
        assert_eq!(
            err.to_string(),
            "several files match the Tasks dataset: tasks.csv, tasks_v2.csv"
        );
    }
}
