//! Repository and store error types.
//!
//! Every failed mutation leaves the rule collection exactly as it was.

use std::path::PathBuf;

use roster_model::{RuleError, RuleKind};
use thiserror::Error;

/// Key-value store error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} store file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete write to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be used as a slot name.
    #[error("Invalid store key: {key:?}")]
    InvalidKey { key: String },

    /// Slot content is not rule data.
    #[error("Stored slot {key} is not valid rule data")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Slot was written by a newer schema.
    #[error("Stored slot version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },

    /// Serialization error.
    #[error("Failed to serialize rules")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

/// One rule that failed validation during an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// Position in the imported batch.
    pub index: usize,
    pub kind: RuleKind,
    pub violations: Vec<String>,
}

/// Rule repository error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The rule breaks its variant's invariants.
    #[error(transparent)]
    InvalidRule(#[from] RuleError),

    #[error("Rule index {index} is out of range ({len} rules)")]
    IndexOutOfRange { index: usize, len: usize },

    /// At least one imported rule was invalid; nothing was imported.
    #[error("Import rejected: {failed} of {total} rules failed validation")]
    ImportRejected {
        failed: usize,
        total: usize,
        failures: Vec<ImportFailure>,
    },

    /// Import payload is not a rule list or export document.
    #[error("Malformed rule import: {source}")]
    MalformedImport {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    /// Violation messages carried by the error, if any.
    pub fn violations(&self) -> Vec<String> {
        match self {
            Self::InvalidRule(error) => error.violations().to_vec(),
            Self::ImportRejected { failures, .. } => failures
                .iter()
                .flat_map(|failure| {
                    failure
                        .violations
                        .iter()
                        .map(move |message| format!("rule {}: {message}", failure.index + 1))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
