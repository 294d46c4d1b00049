//! Dataset ingestion for roster sessions.
//!
//! Finds the clients, workers and tasks CSV files in a directory and reads
//! them into untyped rows.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use roster_ingest::load_dataset_set;
//!
//! let datasets = load_dataset_set(Path::new("data/session1"))?;
//! let results = roster_validate::validate_all(&datasets);
//! ```

mod discovery;
mod error;
mod reader;

use std::path::Path;

use roster_model::{DatasetKind, DatasetSet};

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{parse_rows, read_rows};

// === File Discovery ===
pub use discovery::{DiscoveredDatasets, discover_datasets, list_csv_files, match_dataset};

/// Discover and read every dataset in `dir`.
///
/// A dataset with no matching file loads as empty.
pub fn load_dataset_set(dir: &Path) -> Result<DatasetSet> {
    let discovered = discover_datasets(dir)?;
    load_discovered(&discovered)
}

/// Read the files found by [`discover_datasets`].
pub fn load_discovered(discovered: &DiscoveredDatasets) -> Result<DatasetSet> {
    let mut datasets = DatasetSet::default();
    for kind in DatasetKind::ALL {
        match discovered.get(kind) {
            Some(path) => datasets.set_rows(kind, read_rows(path)?),
            None => tracing::warn!(dataset = %kind, "No file found - dataset is empty"),
        }
    }
    Ok(datasets)
}
