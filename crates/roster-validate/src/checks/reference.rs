//! Cross-dataset references (e.g. RequestedTaskIDs -> TaskID).

use std::collections::HashSet;

use roster_model::{Finding, Row, list_tokens, text_of};

/// Emit one finding per referenced token that is not in `valid_ids`.
pub fn check(rows: &[Row], column: &str, valid_ids: &HashSet<String>) -> Vec<Finding> {
    let mut issues = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let text = text_of(row, column);
        for token in list_tokens(&text) {
            if !valid_ids.contains(token) {
                issues.push(Finding::error(
                    idx + 1,
                    column,
                    format!("Referenced ID not found: {token}"),
                ));
            }
        }
    }

    issues
}
