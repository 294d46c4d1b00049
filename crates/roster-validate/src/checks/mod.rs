//! Row validators and the fixed per-dataset pipelines.
//!
//! Each module performs one independent check. Checks never fail: missing
//! data degrades to no findings or a single "missing column" finding.
//! Findings from different checks accumulate without suppression.

pub mod circular;
pub mod duplicate;
pub mod group;
pub mod json;
pub mod load;
pub mod numeric;
pub mod range;
pub mod reference;
pub mod required;
pub mod skills;

use std::collections::HashSet;

use roster_model::columns::{
    ATTRIBUTES_JSON, AVAILABLE_SLOTS, DURATION, GROUP_TAG, PRIORITY_LEVEL, REQUESTED_TASK_IDS,
    TASK_ID, WORKER_GROUP,
};
use roster_model::{DatasetKind, Finding, Row, text_of};

/// Run the clients pipeline.
pub fn run_clients(clients: &[Row], task_ids: &HashSet<String>) -> Vec<Finding> {
    let kind = DatasetKind::Clients;
    let mut issues = Vec::new();

    // 1. Schema presence
    issues.extend(required::check(clients, kind.required_columns()));

    // 2. ClientID uniqueness
    issues.extend(duplicate::check(clients, kind.id_column()));

    // 3. PriorityLevel in 1..=5
    issues.extend(range::check(clients, PRIORITY_LEVEL, 1.0, 5.0));

    // 4. RequestedTaskIDs must name existing tasks
    issues.extend(reference::check(clients, REQUESTED_TASK_IDS, task_ids));

    // 5. AttributesJSON must parse
    issues.extend(json::check(clients, ATTRIBUTES_JSON));

    // 6. GroupTag must be set
    issues.extend(group::check(clients, GROUP_TAG));

    issues
}

/// Run the workers pipeline.
pub fn run_workers(workers: &[Row]) -> Vec<Finding> {
    let kind = DatasetKind::Workers;
    let mut issues = Vec::new();

    issues.extend(required::check(workers, kind.required_columns()));
    issues.extend(duplicate::check(workers, kind.id_column()));
    issues.extend(numeric::check(workers, AVAILABLE_SLOTS));
    issues.extend(load::check(workers));
    issues.extend(group::check(workers, WORKER_GROUP));

    issues
}

/// Run the tasks pipeline. Skill coverage needs the workers as well.
pub fn run_tasks(tasks: &[Row], workers: &[Row]) -> Vec<Finding> {
    let kind = DatasetKind::Tasks;
    let mut issues = Vec::new();

    issues.extend(required::check(tasks, kind.required_columns()));
    issues.extend(duplicate::check(tasks, kind.id_column()));
    issues.extend(range::check(tasks, DURATION, 1.0, f64::INFINITY));
    issues.extend(skills::check(tasks, workers));
    issues.extend(circular::check(tasks));

    issues
}

/// TaskIDs that client requests may reference (trimmed, non-empty).
pub fn task_id_set(tasks: &[Row]) -> HashSet<String> {
    tasks
        .iter()
        .map(|task| text_of(task, TASK_ID).trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}
