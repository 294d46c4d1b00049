//! Dataset validation for roster sessions.
//!
//! This crate checks the clients, workers and tasks datasets together:
//!
//! - **Schema**: required columns are present
//! - **Identity**: ClientID / WorkerID / TaskID are unique
//! - **Ranges**: PriorityLevel in 1..=5, Duration of at least 1
//! - **References**: RequestedTaskIDs point at existing tasks
//! - **Coverage**: every RequiredSkills token is offered by some worker
//! - **Capacity**: AvailableSlots covers MaxLoadPerPhase
//! - **Formats**: numeric slot lists, AttributesJSON, non-empty group tags
//!
//! # Example
//!
//! ```ignore
//! use roster_validate::validate_all;
//!
//! let results = validate_all(&datasets);
//! for (kind, result) in results.iter() {
//!     println!("{kind}: {} errors", result.error_count());
//! }
//! ```

pub mod checks;

use roster_model::{DatasetResults, DatasetSet, ValidationResult};

/// Validate all three datasets.
///
/// Validation is all-or-nothing: cross-dataset checks need every dataset, so
/// if any of them is empty every result comes back empty. Findings are ordered
/// by check first, then by row, and recomputing on unchanged input yields the
/// same results.
pub fn validate_all(datasets: &DatasetSet) -> DatasetResults {
    if !datasets.is_complete() {
        tracing::debug!(
            missing = ?datasets.missing(),
            "Datasets incomplete - skipping validation"
        );
        return DatasetResults::default();
    }

    let span = tracing::debug_span!(
        "validate_all",
        clients = datasets.clients.len(),
        workers = datasets.workers.len(),
        tasks = datasets.tasks.len()
    );
    let _guard = span.enter();

    let task_ids = checks::task_id_set(&datasets.tasks);

    let results = DatasetResults {
        clients: ValidationResult::from_findings(checks::run_clients(
            &datasets.clients,
            &task_ids,
        )),
        workers: ValidationResult::from_findings(checks::run_workers(&datasets.workers)),
        tasks: ValidationResult::from_findings(checks::run_tasks(
            &datasets.tasks,
            &datasets.workers,
        )),
    };

    tracing::debug!(
        client_findings = results.clients.errors.len(),
        worker_findings = results.workers.errors.len(),
        task_findings = results.tasks.errors.len(),
        "Validation complete"
    );

    results
}
