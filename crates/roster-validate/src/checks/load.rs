//! Worker capacity: a worker needs at least as many slots as its phase load.

use roster_model::cell::format_number;
use roster_model::columns::{AVAILABLE_SLOTS, MAX_LOAD_PER_PHASE};
use roster_model::{Finding, Row, list_tokens, number_of, text_of};

/// Flag workers whose AvailableSlots count is below MaxLoadPerPhase.
///
/// Slots are counted, not parsed. A non-numeric MaxLoadPerPhase reads as NaN
/// and never compares below the count, so it passes.
pub fn check(rows: &[Row]) -> Vec<Finding> {
    let mut issues = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let slots = text_of(row, AVAILABLE_SLOTS);
        let slot_count = list_tokens(&slots).count();
        let max_load = number_of(row, MAX_LOAD_PER_PHASE);
        if (slot_count as f64) < max_load {
            issues.push(Finding::error(
                idx + 1,
                AVAILABLE_SLOTS,
                format!(
                    "{AVAILABLE_SLOTS} has {slot_count} slot(s), fewer than {MAX_LOAD_PER_PHASE} ({})",
                    format_number(max_load)
                ),
            ));
        }
    }

    issues
}
