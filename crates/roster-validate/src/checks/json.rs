//! JSON attribute columns.
//!
//! Spreadsheet exports often wrap the JSON object in stray text, so the span
//! from the first `{` to the last `}` is parsed when both braces are present.

use roster_model::{Finding, Row};

pub fn check(rows: &[Row], column: &str) -> Vec<Finding> {
    if !rows.iter().any(|row| row.contains_key(column)) {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let Some(value) = row.get(column).filter(|value| value.is_truthy()) else {
            continue;
        };
        let text = value.to_text();
        if serde_json::from_str::<serde_json::Value>(json_span(&text)).is_err() {
            issues.push(Finding::error(idx + 1, column, format!("Invalid JSON in {column}")));
        }
    }

    issues
}

/// Outermost `{...}` span, or the whole text when it has no braces.
fn json_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &text[start..=end],
        // "}{": the braces are inverted and nothing parses
        (Some(_), Some(_)) => "",
        _ => text,
    }
}
