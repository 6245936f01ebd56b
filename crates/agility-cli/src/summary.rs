use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use agility_cli::pipeline::ReportRow;

use crate::types::{ReportResult, VenueSummary};

/// Column holding the points figure of event lines.
const POINTS_COLUMN: usize = 6;

pub fn print_report(result: &ReportResult) {
    println!("Dog: {}", result.dog);
    if let Some(path) = &result.html {
        println!("HTML: {}", path.display());
    }
    if result.rows.is_empty() {
        println!("No points to report.");
        return;
    }
    let mut table = Table::new();
    apply_report_table_style(&mut table);
    for row in &result.rows {
        table.add_row(row_cells(row));
    }
    align_column(&mut table, POINTS_COLUMN, CellAlignment::Right);
    println!("{table}");
}

pub fn print_venues(venues: &[VenueSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Venue"),
        header_cell("Name"),
        header_cell("Divisions"),
        header_cell("Events"),
        header_cell("MultiQs"),
        header_cell("Titles"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for venue in venues {
        table.add_row(vec![
            Cell::new(&venue.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&venue.long_name),
            Cell::new(venue.divisions.join("\n")),
            Cell::new(venue.events.join(", ")),
            count_cell(venue.multi_qs),
            count_cell(venue.titles),
        ]);
    }
    println!("{table}");
}

fn row_cells(row: &ReportRow) -> Vec<Cell> {
    row.columns
        .iter()
        .map(|text| match row.kind {
            "dog" | "venue" => Cell::new(text)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            "lifetime" | "multi-q" | "speed" => Cell::new(text).add_attribute(Attribute::Bold),
            "lifetime-by-name" | "text" => dim_cell(text),
            _ => Cell::new(text),
        })
        .collect()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
