//! Group tag presence (GroupTag, WorkerGroup).

use roster_model::{Finding, Row, text_of};

pub fn check(rows: &[Row], column: &str) -> Vec<Finding> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| text_of(row, column).trim().is_empty())
        .map(|(idx, _)| Finding::error(idx + 1, column, format!("{column} must not be empty")))
        .collect()
}
