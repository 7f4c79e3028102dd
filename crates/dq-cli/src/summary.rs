//! Terminal rendering of analysis reports and transformation outcomes.

use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dq_model::{AnalysisReport, DatasetMetadata, Severity};
use dq_transform::TransformOutcome;

pub fn print_report(metadata: &DatasetMetadata, report: &AnalysisReport) {
    println!("Dataset: {} ({})", metadata.filename, metadata.id);
    println!(
        "Rows: {}  Columns: {}  Size: {} bytes",
        metadata.row_count,
        report.schema.len(),
        metadata.size_bytes
    );
    print_schema_table(report);
    print_issue_table(report);
    println!(
        "Issues: {} high, {} medium, {} low",
        report.count_by_severity(Severity::High),
        report.count_by_severity(Severity::Medium),
        report.count_by_severity(Severity::Low),
    );
}

fn print_schema_table(report: &AnalysisReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Missing"),
        header_cell("Missing %"),
        header_cell("Unique"),
        header_cell("Examples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (name, profile) in &report.schema {
        table.add_row(vec![
            Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(profile.inferred_type.to_string()),
            count_cell(profile.missing_count),
            Cell::new(format!("{:.1}", profile.missing_pct * 100.0)),
            Cell::new(profile.nunique),
            Cell::new(profile.example_values.join(", ")),
        ]);
    }
    println!("{table}");
}

fn print_issue_table(report: &AnalysisReport) {
    if report.issues.is_empty() {
        println!("No issues found.");
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        a.id.cmp(&b.id)
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Severity"),
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Score"),
        header_cell("Rows"),
        header_cell("Suggested fix"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.id.clone()),
            severity_cell(issue.severity),
            Cell::new(issue.column.clone().unwrap_or_else(|| "-".to_string())),
            Cell::new(issue.kind.as_str()),
            Cell::new(format!("{:.2}", issue.score)).fg(severity_color(issue.severity)),
            row_sample_cell(&issue.rows),
            Cell::new(
                issue
                    .suggested_fix
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_outcome(metadata: &DatasetMetadata, outcome: &TransformOutcome, transform_id: &str) {
    println!("Dataset: {} ({})", metadata.filename, metadata.id);
    println!("Transformation: {transform_id}");
    let evidence = &outcome.evidence;
    println!("Changed cells: {}", evidence.changed_count);
    if let Some(value) = &evidence.filled_value {
        println!("Fill value: {}", value.to_literal().unwrap_or_default());
    }
    if let (Some(lower), Some(upper)) = (evidence.lower, evidence.upper) {
        println!("Fences: [{lower}, {upper}]");
    }
    if let Some(removed) = evidence.removed_count {
        println!("Removed records: {removed}");
    }
    if let Some(reason) = &evidence.reason {
        println!("No-op reason: {reason}");
    }
    println!("Records after: {}", outcome.records.len());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
        ]);
    }
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

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn row_sample_cell(rows: &[usize]) -> Cell {
    if rows.is_empty() {
        return dim_cell("-");
    }
    let sample: Vec<String> = rows.iter().take(5).map(ToString::to_string).collect();
    let suffix = if rows.len() > 5 { ", .." } else { "" };
    Cell::new(format!("{}{suffix}", sample.join(", ")))
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::High => Cell::new("HIGH")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        Severity::Low => Cell::new("LOW").fg(Color::Green),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::High => 3,
        Severity::Medium => 2,
        Severity::Low => 1,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Green,
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
