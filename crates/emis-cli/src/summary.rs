use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::AuditResult;

pub fn print_summary(result: &AuditResult) {
    println!("Report: {}", result.report_path.display());
    println!("Lookup rows: {}", result.lookup_rows);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("File"),
        header_cell("Records"),
        header_cell("Unresolved"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_records = 0usize;
    let mut total_unresolved = 0usize;
    for file in &result.files {
        total_records += file.records;
        total_unresolved += file.unresolved;
        let file_name = file
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            template_cell(&file.template_name),
            Cell::new(file_name),
            count_cell(file.records, Color::Reset),
            count_cell(file.unresolved, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} files", result.files.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        count_cell(total_unresolved, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !result.skipped_files.is_empty() {
        eprintln!("Skipped files:");
        for file in &result.skipped_files {
            eprintln!("- {file}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
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

fn template_cell(name: &str) -> Cell {
    Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, highlight: Color) -> Cell {
    if count > 0 && highlight != Color::Reset {
        Cell::new(count).fg(highlight).add_attribute(Attribute::Bold)
    } else if count == 0 && highlight != Color::Reset {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
