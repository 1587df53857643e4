use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use landscape_cli::pipeline::{CompletenessReport, ValidationOutcome};
use landscape_model::{
    CellValue, CollectionReport, DatasetKind, FileReport, Record, REQUIRED_ARTIFACTS,
    SessionOverview, SessionStatus,
};

/// Print any result as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize result")?;
    println!("{json}");
    Ok(())
}

pub fn print_collection(report: &CollectionReport) {
    println!("Session: {}", report.session_id);
    let mut table = file_table();
    for file in report.results.values() {
        table.add_row(file_row(file));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(report.issue_count(), Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    println!(
        "All required datasets present: {}",
        if report.all_required_present { "yes" } else { "no" }
    );
}

pub fn print_validation(outcome: &ValidationOutcome) {
    println!("Session: {}", outcome.session_id);
    let mut table = file_table();
    table.add_row(file_row(&outcome.file));
    println!("{table}");
}

pub fn print_status(status: &SessionStatus) {
    println!("Session: {}", status.session_id);
    if status.files.is_empty() {
        println!("No normalized artifacts yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Artifact")]);
    apply_table_style(&mut table);
    for file in &status.files {
        table.add_row(vec![Cell::new(file)]);
    }
    println!("{table}");
}

pub fn print_overview(overview: &SessionOverview) {
    println!("Session: {}", overview.session_id);
    if overview.systems.is_empty() {
        println!("No system inventory collected.");
    } else {
        println!("{}", systems_table(&overview.systems));
    }
    if !overview.collection_files.is_empty() {
        println!("Collected: {}", overview.collection_files.join(", "));
    }
}

pub fn print_completeness(report: &CompletenessReport) {
    println!("Session: {}", report.session_id);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Required artifact"), header_cell("Present")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for required in REQUIRED_ARTIFACTS {
        let present = !report.missing.iter().any(|missing| missing == required);
        table.add_row(vec![Cell::new(required), presence_cell(present)]);
    }
    println!("{table}");
    println!(
        "Session is {}",
        if report.complete { "complete" } else { "incomplete" }
    );
}

#[derive(Serialize)]
pub struct KindRow {
    pub kind: DatasetKind,
    pub label: &'static str,
    pub upload_name: &'static str,
    pub artifact_name: String,
    pub required: bool,
}

pub fn kind_rows() -> Vec<KindRow> {
    DatasetKind::ALL
        .into_iter()
        .map(|kind| KindRow {
            kind,
            label: kind.label(),
            upload_name: kind.upload_name(),
            artifact_name: kind.artifact_name(),
            required: kind.is_required(),
        })
        .collect()
}

pub fn print_kinds(rows: &[KindRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Upload name"),
        header_cell("Artifact"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.label),
            Cell::new(row.upload_name),
            dim_cell(&row.artifact_name),
            if row.required {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("no")
            },
        ]);
    }
    println!("{table}");
}

fn file_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Issues"),
        header_cell("Feedback"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

fn file_row(file: &FileReport) -> Vec<Cell> {
    vec![
        Cell::new(&file.filename).add_attribute(Attribute::Bold),
        if file.valid {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new("INVALID")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        },
        count_cell(file.issues.len(), Color::Red),
        Cell::new(&file.feedback),
    ]
}

/// One column per header seen across the inventory, in first-seen order.
fn systems_table(systems: &[Record]) -> Table {
    let mut columns: Vec<&str> = Vec::new();
    for record in systems {
        for column in record.columns() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    let mut table = Table::new();
    table.set_header(columns.iter().map(|column| header_cell(column)));
    apply_table_style(&mut table);
    for record in systems {
        table.add_row(columns.iter().map(|column| match record.get(column) {
            Some(CellValue::Empty) | None => dim_cell("-"),
            Some(value) => Cell::new(value),
        }));
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn presence_cell(present: bool) -> Cell {
    if present {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("missing")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
