use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hiring_report::{ReportOutcome, render_kpi};
use hiring_store::TableInfo;

use crate::commands::EtlOutcome;

pub fn print_etl_summary(outcome: &EtlOutcome) {
    println!("Input: {}", outcome.input.display());
    println!("{}", etl_table(outcome));
    if let Some(table) = drop_table(outcome) {
        println!("{table}");
    }
    if let Some(load) = &outcome.load {
        println!(
            "Loaded {} rows into {} tables in {} ms",
            load.total_rows(),
            load.tables.len(),
            load.elapsed.as_millis()
        );
    }
    for path in &outcome.exports {
        println!("Exported: {}", path.display());
    }
}

/// Rows built per table, with loaded counts when a database was written.
pub fn etl_table(outcome: &EtlOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows built"),
        header_cell("Rows loaded"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let rows = outcome
        .dimensions
        .iter()
        .copied()
        .chain(std::iter::once(("fact_selection", outcome.stats.rows_kept)));
    for (name, built) in rows {
        let loaded = outcome.load.as_ref().and_then(|load| load.rows(name));
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(built),
            loaded.map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    table
}

/// Records excluded from the fact table, by reason. `None` when nothing was dropped.
pub fn drop_table(outcome: &EtlOutcome) -> Option<Table> {
    let stats = &outcome.stats;
    if stats.dropped_total() == 0 {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Dropped because"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, count) in &stats.dropped {
        table.add_row(vec![
            Cell::new(reason),
            Cell::new(count).fg(Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} of {}", stats.dropped_total(), stats.rows_read))
            .add_attribute(Attribute::Bold),
    ]);
    Some(table)
}

pub fn print_report(outcome: &ReportOutcome) {
    for result in &outcome.results {
        println!("{}\n", render_kpi(result));
    }
    for path in &outcome.charts {
        println!("Chart: {}", path.display());
    }
    if !outcome.failures.is_empty() {
        eprintln!("Errors:");
        for (kpi, error) in &outcome.failures {
            eprintln!("- {kpi}: {error}");
        }
    }
}

pub fn schema_table(tables: &[TableInfo]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Key"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for info in tables {
        for (idx, column) in info.columns.iter().enumerate() {
            let table_cell = if idx == 0 {
                Cell::new(&info.name).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            let key_cell = if column.primary_key {
                Cell::new("PK").fg(Color::Green)
            } else {
                dim_cell("")
            };
            table.add_row(vec![
                table_cell,
                Cell::new(&column.name),
                dim_cell(&column.sql_type),
                key_cell,
            ]);
        }
    }
    table
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
        .set_width(100);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
