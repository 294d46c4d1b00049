//! Tests for the dataset validation pipelines.

use proptest::prelude::*;

use roster_model::{
    CLIENT_COLUMNS, CellValue, DatasetResults, DatasetSet, Row, Severity, TASK_COLUMNS,
    WORKER_COLUMNS,
};
use roster_validate::validate_all;

fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(column, value)| (column.to_string(), CellValue::from(*value)))
        .collect()
}

fn client(id: &str, priority: &str, requested: &str) -> Row {
    row(&[
        ("ClientID", id),
        ("ClientName", "Acme"),
        ("PriorityLevel", priority),
        ("RequestedTaskIDs", requested),
        ("GroupTag", "GroupA"),
        ("AttributesJSON", r#"{"location": "north"}"#),
    ])
}

fn worker(id: &str, skills: &str, slots: &str, max_load: &str) -> Row {
    row(&[
        ("WorkerID", id),
        ("WorkerName", "Ann"),
        ("Skills", skills),
        ("AvailableSlots", slots),
        ("MaxLoadPerPhase", max_load),
        ("WorkerGroup", "GroupA"),
        ("QualificationLevel", "3"),
    ])
}

fn task(id: &str, duration: &str, skills: &str) -> Row {
    row(&[
        ("TaskID", id),
        ("TaskName", "Build"),
        ("Category", "Engineering"),
        ("Duration", duration),
        ("RequiredSkills", skills),
        ("PreferredPhases", "1-3"),
        ("MaxConcurrent", "2"),
    ])
}

fn clean_datasets() -> DatasetSet {
    DatasetSet::new(
        vec![client("C1", "3", "T1,T2"), client("C2", "5", "T2")],
        vec![
            worker("W1", "coding,testing", "1,2,3", "2"),
            worker("W2", "design", "2;4", "1"),
        ],
        vec![task("T1", "2", "coding"), task("T2", "1", "design, testing")],
    )
}

#[test]
fn clean_datasets_have_no_findings() {
    let results = validate_all(&clean_datasets());
    assert_eq!(results, DatasetResults::default());
    assert!(!results.has_errors());
}

#[test]
fn empty_dataset_skips_everything() {
    let mut datasets = clean_datasets();
    datasets.clients[0] = client("C1", "99", "T404");
    datasets.workers.clear();

    let results = validate_all(&datasets);
    assert_eq!(results, DatasetResults::default());
    let json = serde_json::to_value(&results.clients).expect("serialize");
    assert_eq!(json, serde_json::json!({"errors": [], "summary": {}}));
}

#[test]
fn duplicate_client_id_reported_once_at_row_three() {
    let mut datasets = clean_datasets();
    datasets.clients = vec![
        client("C1", "3", "T1"),
        client("C2", "3", "T1"),
        client("C1", "3", "T1"),
    ];

    let results = validate_all(&datasets);
    let on_id: Vec<_> = results
        .clients
        .errors
        .iter()
        .filter(|finding| finding.column == "ClientID")
        .collect();
    assert_eq!(on_id.len(), 1);
    assert_eq!(on_id[0].row, 3);
    assert_eq!(results.clients.error_count(), 1);
}

#[test]
fn priority_level_bounds() {
    let mut datasets = clean_datasets();
    datasets.clients = vec![client("C1", "6", "T1"), client("C2", "5", "T1")];

    let results = validate_all(&datasets);
    assert_eq!(results.clients.errors.len(), 1);
    let finding = &results.clients.errors[0];
    assert_eq!(finding.column, "PriorityLevel");
    assert_eq!(finding.row, 1);
}

#[test]
fn requested_task_ids_must_exist() {
    let mut datasets = clean_datasets();
    datasets.clients = vec![client("C1", "3", "T1,T9")];

    let results = validate_all(&datasets);
    assert_eq!(results.clients.errors.len(), 1);
    assert_eq!(results.clients.errors[0].column, "RequestedTaskIDs");
    assert!(results.clients.errors[0].message.contains("T9"));
}

#[test]
fn missing_columns_reported_at_header() {
    let mut datasets = clean_datasets();
    let mut partial = worker("W1", "coding,testing,design", "1,2", "1");
    partial.remove("QualificationLevel");
    datasets.workers = vec![partial];

    let results = validate_all(&datasets);
    assert_eq!(results.workers.errors.len(), 1);
    assert_eq!(results.workers.errors[0].row, 0);
    assert_eq!(
        results.workers.errors[0].message,
        "Missing required column: QualificationLevel"
    );
}

#[test]
fn worker_pipeline_order_and_summary() {
    let mut datasets = clean_datasets();
    datasets.workers = vec![
        worker("W1", "coding,testing,design", "1,x", "5"),
        worker("W1", "ops", "1", "1"),
    ];
    datasets.workers[1].insert("WorkerGroup".to_string(), CellValue::from(" "));

    let results = validate_all(&datasets);
    let columns: Vec<(&str, usize)> = results
        .workers
        .errors
        .iter()
        .map(|finding| (finding.column.as_str(), finding.row))
        .collect();
    assert_eq!(
        columns,
        vec![
            ("WorkerID", 2),
            ("AvailableSlots", 1),
            ("AvailableSlots", 1),
            ("WorkerGroup", 2),
        ]
    );
    assert_eq!(results.workers.summary.get(&Severity::Error), Some(&4));
}

#[test]
fn task_pipeline_checks_duration_and_skills() {
    let mut datasets = clean_datasets();
    datasets.tasks = vec![task("T1", "0", "coding"), task("T2", "3", "welding")];

    let results = validate_all(&datasets);
    let columns: Vec<(&str, usize)> = results
        .tasks
        .errors
        .iter()
        .map(|finding| (finding.column.as_str(), finding.row))
        .collect();
    assert_eq!(columns, vec![("Duration", 1), ("RequiredSkills", 2)]);
    // T2 no longer needs testing/design, clients still reference T1/T2
    assert!(results.clients.is_empty());
}

#[test]
fn attributes_json_with_surrounding_text_passes() {
    let mut datasets = clean_datasets();
    datasets.clients[0].insert(
        "AttributesJSON".to_string(),
        CellValue::from(r#"notes: {"budget": 10} (approx)"#),
    );
    datasets.clients[1].insert("AttributesJSON".to_string(), CellValue::from("budget=10"));

    let results = validate_all(&datasets);
    assert_eq!(results.clients.errors.len(), 1);
    assert_eq!(results.clients.errors[0].row, 2);
}

// --- properties ---

fn cell_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Null),
        any::<bool>().prop_map(CellValue::Bool),
        (-2i64..8).prop_map(CellValue::from),
        "[A-Z0-9,;{} ]{0,6}".prop_map(CellValue::Text),
    ]
}

fn row_strategy(columns: &'static [&'static str]) -> impl Strategy<Value = Row> {
    prop::collection::vec(proptest::option::of(cell_strategy()), columns.len()).prop_map(
        move |cells| {
            columns
                .iter()
                .zip(cells)
                .filter_map(|(column, cell)| cell.map(|value| (column.to_string(), value)))
                .collect()
        },
    )
}

fn datasets_strategy() -> impl Strategy<Value = DatasetSet> {
    (
        prop::collection::vec(row_strategy(CLIENT_COLUMNS), 0..5),
        prop::collection::vec(row_strategy(WORKER_COLUMNS), 0..5),
        prop::collection::vec(row_strategy(TASK_COLUMNS), 0..5),
    )
        .prop_map(|(clients, workers, tasks)| DatasetSet::new(clients, workers, tasks))
}

proptest! {
    #[test]
    fn validation_is_idempotent(datasets in datasets_strategy()) {
        let first = validate_all(&datasets);
        let second = validate_all(&datasets);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn any_empty_dataset_yields_empty_results(
        datasets in datasets_strategy(),
        emptied in 0usize..3,
    ) {
        let mut datasets = datasets;
        match emptied {
            0 => datasets.clients.clear(),
            1 => datasets.workers.clear(),
            _ => datasets.tasks.clear(),
        }
        prop_assert_eq!(validate_all(&datasets), DatasetResults::default());
    }

    #[test]
    fn summary_matches_findings(datasets in datasets_strategy()) {
        let results = validate_all(&datasets);
        for (_, result) in results.iter() {
            let total: usize = result.summary.values().sum();
            prop_assert_eq!(total, result.errors.len());
            prop_assert!(result.summary.values().all(|count| *count > 0));
        }
    }
}
