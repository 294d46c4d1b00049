//! Circular group detection.
//!
//! Registered in the task pipeline so callers can rely on its presence, but
//! it reports nothing: what a "circular group" is has not been settled.

use roster_model::{Finding, Row};

pub fn check(_rows: &[Row]) -> Vec<Finding> {
    Vec::new()
}
