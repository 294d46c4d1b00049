//! Required column presence.
//!
//! A schema-level check: only the first row's keys are inspected, so a later
//! row that lacks a column is not reported here.

use roster_model::{Finding, Row};

/// Report every required column missing from the first row.
pub fn check(rows: &[Row], required: &[&str]) -> Vec<Finding> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    required
        .iter()
        .filter(|column| !first.contains_key(**column))
        .map(|column| Finding::header(*column, format!("Missing required column: {column}")))
        .collect()
}
