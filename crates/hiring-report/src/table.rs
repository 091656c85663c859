//! Terminal rendering of KPI results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::kpi::KpiResult;

pub fn kpi_table(result: &KpiResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_header(
        result
            .result
            .columns
            .iter()
            .map(|column| header_cell(column))
            .collect::<Vec<_>>(),
    );
    for row in &result.result.rows {
        table.add_row(row.iter().map(value_cell).collect::<Vec<_>>());
    }
    for (idx, column) in result.result.columns.iter().enumerate() {
        if column != result.kpi.category
            && result.kpi.series != Some(column.as_str())
            && let Some(target) = table.column_mut(idx)
        {
            target.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// Render a KPI as a titled block of text.
pub fn render_kpi(result: &KpiResult) -> String {
    if result.result.is_empty() {
        return format!("{}\n(no rows)", result.kpi.title);
    }
    format!("{}\n{}", result.kpi.title, kpi_table(result))
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &hiring_model::Cell) -> Cell {
    if value.is_null() {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::HIRES_BY_YEAR;
    use hiring_model::QueryResult;

    #[test]
    fn renders_header_and_rows() {
        let result = KpiResult {
            kpi: &HIRES_BY_YEAR,
            result: QueryResult {
                columns: vec!["year".into(), "hires".into()],
                rows: vec![vec![
                    hiring_model::Cell::Integer(2021),
                    hiring_model::Cell::Integer(4),
                ]],
            },
        };
        let rendered = render_kpi(&result);
        assert!(rendered.starts_with("Hires by Year"));
        assert!(rendered.contains("year"));
        assert!(rendered.contains("2021"));
    }

    #[test]
    fn empty_result_is_noted() {
        let result = KpiResult {
            kpi: &HIRES_BY_YEAR,
            result: QueryResult::default(),
        };
        assert_eq!(render_kpi(&result), "Hires by Year\n(no rows)");
    }
}
