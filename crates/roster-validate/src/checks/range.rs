//! Numeric range checks.

use roster_model::cell::format_number;
use roster_model::{Finding, Row, number_of};

/// Flag rows whose value is not a number or lies outside `[min, max]`.
///
/// `max` may be `f64::INFINITY` for an open upper bound.
pub fn check(rows: &[Row], column: &str, min: f64, max: f64) -> Vec<Finding> {
    let mut issues = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let value = number_of(row, column);
        if value.is_nan() || value < min || value > max {
            issues.push(Finding::error(idx + 1, column, range_message(column, min, max)));
        }
    }

    issues
}

fn range_message(column: &str, min: f64, max: f64) -> String {
    if max == f64::INFINITY {
        format!("{column} must be a number of at least {}", format_number(min))
    } else {
        format!(
            "{column} must be a number between {} and {}",
            format_number(min),
            format_number(max)
        )
    }
}
