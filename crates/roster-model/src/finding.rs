//! Validation findings and per-dataset results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetKind;

/// Finding severity, serialized as the finding's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// One data-quality problem, tagged to a row and column.
///
/// `row` is 1-based; row `0` addresses the header (schema-level findings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub row: usize,
    pub column: String,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
}

impl Finding {
    pub fn error(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Header-level finding (row 0).
    pub fn header(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::error(0, column, message)
    }

    pub fn is_header(&self) -> bool {
        self.row == 0
    }
}

/// Findings for one dataset plus a count per severity.
///
/// Severities with no findings are absent from `summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<Finding>,
    pub summary: BTreeMap<Severity, usize>,
}

impl ValidationResult {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let mut summary = BTreeMap::new();
        for finding in &findings {
            *summary.entry(finding.severity).or_insert(0) += 1;
        }
        Self {
            errors: findings,
            summary,
        }
    }

    pub fn error_count(&self) -> usize {
        self.summary.get(&Severity::Error).copied().unwrap_or(0)
    }

    pub fn warning_count(&self) -> usize {
        self.summary.get(&Severity::Warning).copied().unwrap_or(0)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Findings attached to a 1-based row (0 for header findings).
    pub fn findings_for_row(&self, row: usize) -> impl Iterator<Item = &Finding> {
        self.errors.iter().filter(move |finding| finding.row == row)
    }
}

/// Results for the clients, workers and tasks datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetResults {
    pub clients: ValidationResult,
    pub workers: ValidationResult,
    pub tasks: ValidationResult,
}

impl DatasetResults {
    pub fn get(&self, kind: DatasetKind) -> &ValidationResult {
        match kind {
            DatasetKind::Clients => &self.clients,
            DatasetKind::Workers => &self.workers,
            DatasetKind::Tasks => &self.tasks,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DatasetKind, &ValidationResult)> {
        DatasetKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    pub fn total_errors(&self) -> usize {
        self.iter().map(|(_, result)| result.error_count()).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.iter().map(|(_, result)| result.warning_count()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors() > 0
    }
}
