//! Report tables for the terminal.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use roster_model::{DatasetKind, DatasetResults, DatasetSet, Finding, Rule, Severity};

/// Per-dataset row and finding counts, with a total row.
pub fn validation_summary_table(
    datasets: &DatasetSet,
    results: &DatasetResults,
    width: u16,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table, width);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    let checked = datasets.is_complete();
    let mut total_rows = 0usize;
    for (kind, result) in results.iter() {
        let rows = datasets.rows(kind).len();
        total_rows += rows;
        table.add_row(vec![
            dataset_cell(kind),
            Cell::new(rows),
            count_cell(result.error_count(), Color::Red),
            count_cell(result.warning_count(), Color::Yellow),
            status_cell(checked, rows, result.has_errors()),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        count_cell(results.total_errors(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(results.total_warnings(), Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

/// Every finding, grouped by dataset in pipeline order. `None` when clean.
pub fn issue_table(results: &DatasetResults, width: u16) -> Option<Table> {
    let issues: Vec<(DatasetKind, &Finding)> = results
        .iter()
        .flat_map(|(kind, result)| result.errors.iter().map(move |finding| (kind, finding)))
        .collect();
    if issues.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table, width);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    for (kind, finding) in issues {
        let row_cell = if finding.is_header() {
            dim_cell("header")
        } else {
            Cell::new(finding.row)
        };
        table.add_row(vec![
            dataset_cell(kind),
            row_cell,
            Cell::new(&finding.column),
            severity_cell(finding.severity),
            Cell::new(&finding.message),
        ]);
    }
    Some(table)
}

/// Stored rules with their repository index.
pub fn rules_table(rules: &[Rule], width: u16) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Index"),
        header_cell("Type"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table, width);
    align_column(&mut table, 0, CellAlignment::Right);

    for (index, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(rule.kind().as_str()).fg(Color::Blue),
            Cell::new(rule.describe()),
        ]);
    }
    table
}

/// Required columns per dataset.
pub fn schema_table(width: u16) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("ID column"),
        header_cell("Required columns"),
    ]);
    apply_table_style(&mut table, width);

    for kind in DatasetKind::ALL {
        table.add_row(vec![
            dataset_cell(kind),
            Cell::new(kind.id_column()),
            Cell::new(kind.required_columns().join(", ")),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn apply_summary_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn apply_issue_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(width);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(10)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::UpperBoundary(Width::Fixed(20)),
        ColumnConstraint::UpperBoundary(Width::Fixed(10)),
        ColumnConstraint::UpperBoundary(Width::Percentage(60)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(checked: bool, rows: usize, has_errors: bool) -> Cell {
    if !checked {
        return if rows == 0 {
            Cell::new("missing").fg(Color::Yellow)
        } else {
            dim_cell("not checked")
        };
    }
    if has_errors {
        Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dataset_cell(kind: DatasetKind) -> Cell {
    Cell::new(kind.label())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
