//! Batch summary table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::{BatchResult, WorkbookStatus};

pub fn print_summary(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Workbook"),
        header_cell("Status"),
        header_cell("Mismatches"),
        header_cell("Missing"),
        header_cell("Extra"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for status in &result.statuses {
        match status {
            WorkbookStatus::Succeeded(outcome) => {
                table.add_row(vec![
                    Cell::new(&outcome.entity),
                    Cell::new("ok").fg(Color::Green),
                    count_cell(outcome.mismatches),
                    count_cell(outcome.missing),
                    count_cell(outcome.extras),
                    Cell::new(outcome.output_dir.display()),
                ]);
            }
            WorkbookStatus::Failed { entity, error } => {
                table.add_row(vec![
                    Cell::new(entity),
                    Cell::new("failed")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new(error).fg(Color::Red),
                ]);
            }
        }
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn count_cell(value: usize) -> Cell {
    if value > 0 {
        Cell::new(value).fg(Color::Yellow)
    } else {
        dim_cell(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
