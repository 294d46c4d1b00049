//! Identifier uniqueness.

use std::collections::HashSet;

use roster_model::{CellKey, CellValue, Finding, Row};

/// Flag every repeat of an ID value after its first occurrence.
///
/// Values are compared raw: `"1"` and `1` are different IDs, and rows that
/// lack the column share the same (absent) ID.
pub fn check(rows: &[Row], id_column: &str) -> Vec<Finding> {
    let mut seen: HashSet<Option<CellKey>> = HashSet::new();
    let mut issues = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let cell = row.get(id_column);
        if !seen.insert(cell.map(CellValue::key)) {
            let shown = cell.map_or_else(|| "(missing)".to_string(), |v| v.to_text().into_owned());
            issues.push(Finding::error(
                idx + 1,
                id_column,
                format!("Duplicate {id_column}: {shown}"),
            ));
        }
    }

    issues
}
