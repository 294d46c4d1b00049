//! Numeric list columns (e.g. AvailableSlots = "1,2;3").

use roster_model::{Finding, Row, list_tokens, parse_number, text_of};

/// Flag rows whose list contains a token that is not a number.
pub fn check(rows: &[Row], column: &str) -> Vec<Finding> {
    let mut issues = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let text = text_of(row, column);
        if list_tokens(&text).any(|token| parse_number(token).is_nan()) {
            issues.push(Finding::error(
                idx + 1,
                column,
                format!("{column} must be a list of numbers"),
            ));
        }
    }

    issues
}
