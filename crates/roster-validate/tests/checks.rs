//! Tests for the individual row validators.

use std::collections::HashSet;

use roster_model::{CellValue, Finding, Row};
use roster_validate::checks::{
    circular, duplicate, group, json, load, numeric, range, reference, required, skills,
};

fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(column, value)| (column.to_string(), CellValue::from(*value)))
        .collect()
}

fn rows_of(column: &str, values: &[&str]) -> Vec<Row> {
    values.iter().map(|value| row(&[(column, value)])).collect()
}

fn rows_hit(findings: &[Finding]) -> Vec<usize> {
    findings.iter().map(|finding| finding.row).collect()
}

// --- required columns ---

#[test]
fn required_empty_rows_report_nothing() {
    assert!(required::check(&[], &["A", "B"]).is_empty());
}

#[test]
fn required_checks_first_row_only() {
    let rows = vec![row(&[("A", "1")]), row(&[("B", "2")])];
    let findings = required::check(&rows, &["A", "B"]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].row, 0);
    assert_eq!(findings[0].column, "B");
    assert_eq!(findings[0].message, "Missing required column: B");
}

// --- duplicate ids ---

#[test]
fn duplicate_flags_each_repeat_at_its_row() {
    let rows = rows_of("ID", &["C1", "C2", "C1", "C1"]);
    let findings = duplicate::check(&rows, "ID");
    assert_eq!(rows_hit(&findings), vec![3, 4]);
    assert_eq!(findings[0].message, "Duplicate ID: C1");
}

#[test]
fn duplicate_compares_raw_values() {
    let mut number_row = Row::new();
    number_row.insert("ID".to_string(), CellValue::from(1i64));
    let rows = vec![row(&[("ID", "1")]), number_row];
    assert!(duplicate::check(&rows, "ID").is_empty());
}

#[test]
fn duplicate_treats_absent_ids_as_equal() {
    let rows = vec![row(&[("Name", "a")]), row(&[("Name", "b")])];
    let findings = duplicate::check(&rows, "ID");
    assert_eq!(rows_hit(&findings), vec![2]);
}

// --- numeric lists ---

#[test]
fn numeric_list_accepts_mixed_delimiters() {
    let rows = rows_of("Slots", &["1,2;3", " 4 ; 5 ", "", "1,,2"]);
    assert!(numeric::check(&rows, "Slots").is_empty());
}

#[test]
fn numeric_list_flags_row_once() {
    let rows = rows_of("Slots", &["1,x,y", "[1,2]"]);
    let findings = numeric::check(&rows, "Slots");
    assert_eq!(rows_hit(&findings), vec![1, 2]);
}

// --- ranges ---

#[test]
fn range_is_inclusive() {
    let rows = rows_of("P", &["1", "5", "0", "6", "abc", "3.5"]);
    let findings = range::check(&rows, "P", 1.0, 5.0);
    assert_eq!(rows_hit(&findings), vec![3, 4, 5]);
    assert_eq!(findings[0].message, "P must be a number between 1 and 5");
}

#[test]
fn range_with_open_upper_bound() {
    let rows = rows_of("D", &["1", "1000000", "0.5"]);
    let findings = range::check(&rows, "D", 1.0, f64::INFINITY);
    assert_eq!(rows_hit(&findings), vec![3]);
}

#[test]
fn range_flags_missing_column() {
    let rows = vec![row(&[("Other", "1")])];
    assert_eq!(range::check(&rows, "D", 1.0, 5.0).len(), 1);
}

#[test]
fn range_blank_text_reads_as_zero() {
    let rows = rows_of("D", &["  "]);
    assert!(range::check(&rows, "D", 0.0, 1.0).is_empty());
}

// --- json ---

#[test]
fn json_skipped_without_column() {
    let rows = rows_of("Other", &["not json"]);
    assert!(json::check(&rows, "Attrs").is_empty());
}

#[test]
fn json_extracts_outer_braces_and_skips_falsy() {
    let rows = rows_of(
        "Attrs",
        &[
            r#"{"a": 1}"#,
            r#"meta: {"a": {"b": 2}} trailing"#,
            "",
            "plain text",
            r#"{"a": }"#,
        ],
    );
    let findings = json::check(&rows, "Attrs");
    assert_eq!(rows_hit(&findings), vec![4, 5]);
    assert_eq!(findings[0].message, "Invalid JSON in Attrs");
}

// --- references ---

#[test]
fn reference_reports_each_missing_token() {
    let valid: HashSet<String> = ["T1".to_string()].into_iter().collect();
    let rows = rows_of("Req", &["T1,T9", "T8; T9", "", "T1"]);
    let findings = reference::check(&rows, "Req", &valid);
    assert_eq!(rows_hit(&findings), vec![1, 2, 2]);
    assert!(findings[0].message.contains("T9"));
    assert!(findings[1].message.contains("T8"));
}

// --- group tags ---

#[test]
fn group_flags_blank_and_missing() {
    let mut rows = rows_of("G", &["GA", "   ", ""]);
    rows.push(row(&[("Other", "x")]));
    let findings = group::check(&rows, "G");
    assert_eq!(rows_hit(&findings), vec![2, 3, 4]);
}

// --- worker load ---

#[test]
fn load_flags_too_few_slots() {
    let rows = vec![
        row(&[("AvailableSlots", "1,2,3"), ("MaxLoadPerPhase", "3")]),
        row(&[("AvailableSlots", "1;2"), ("MaxLoadPerPhase", "3")]),
        row(&[("AvailableSlots", "a,b,c"), ("MaxLoadPerPhase", "3")]),
    ];
    let findings = load::check(&rows);
    assert_eq!(rows_hit(&findings), vec![2]);
    assert_eq!(findings[0].column, "AvailableSlots");
}

#[test]
fn load_passes_non_numeric_max_load() {
    let rows = vec![
        row(&[("AvailableSlots", ""), ("MaxLoadPerPhase", "lots")]),
        row(&[("AvailableSlots", "")]),
    ];
    assert!(load::check(&rows).is_empty());
}

// --- skill coverage ---

#[test]
fn skills_flag_uncovered_tokens() {
    let workers = vec![
        row(&[("Skills", "coding, testing")]),
        row(&[("Skills", "design;ops")]),
    ];
    let tasks = vec![
        row(&[("RequiredSkills", "coding,ops")]),
        row(&[("RequiredSkills", "ml, coding, qa")]),
    ];
    let findings = skills::check(&tasks, &workers);
    assert_eq!(rows_hit(&findings), vec![2, 2]);
    assert!(findings[0].message.ends_with("ml"));
    assert!(findings[1].message.ends_with("qa"));
}

// --- circular groups ---

#[test]
fn circular_groups_reports_nothing() {
    let rows = rows_of("TaskID", &["T1", "T1"]);
    assert!(circular::check(&rows).is_empty());
}
