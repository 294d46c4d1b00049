//! Dataset file discovery.
//!
//! A file belongs to a dataset when its stem starts with the dataset name,
//! ignoring case: `Clients.csv`, `clients_2024.csv` and `CLIENTS-final.csv`
//! are all client files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use roster_model::DatasetKind;

use crate::error::{IngestError, Result};

/// Dataset files found in a directory, at most one per dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredDatasets {
    files: BTreeMap<DatasetKind, PathBuf>,
}

impl DiscoveredDatasets {
    pub fn get(&self, kind: DatasetKind) -> Option<&Path> {
        self.files.get(&kind).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DatasetKind, &Path)> {
        self.files.iter().map(|(kind, path)| (*kind, path.as_path()))
    }

    /// Datasets with no matching file.
    pub fn missing(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| !self.files.contains_key(kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Lists all CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Match a file stem to a dataset.
pub fn match_dataset(stem: &str) -> Option<DatasetKind> {
    let stem = stem.to_ascii_lowercase();
    DatasetKind::ALL
        .into_iter()
        .find(|kind| stem.starts_with(kind.as_str()))
}

/// Find the clients, workers and tasks files in `dir`.
///
/// Files that match no dataset are skipped. Two files matching the same
/// dataset is an error rather than a guess.
pub fn discover_datasets(dir: &Path) -> Result<DiscoveredDatasets> {
    let mut matches: BTreeMap<DatasetKind, Vec<PathBuf>> = BTreeMap::new();

    for path in list_csv_files(dir)? {
        let stem = path
            .file_stem()
            .and_then(|v| v.to_str())
            .unwrap_or("");

        match match_dataset(stem) {
            Some(kind) => matches.entry(kind).or_default().push(path),
            None => tracing::debug!(path = %path.display(), "Skipping unrecognized CSV"),
        }
    }

    let mut files = BTreeMap::new();
    for (kind, mut paths) in matches {
        if paths.len() > 1 {
            return Err(IngestError::AmbiguousDataset { kind, paths });
        }
        if let Some(path) = paths.pop() {
            files.insert(kind, path);
        }
    }

    Ok(DiscoveredDatasets { files })
}
