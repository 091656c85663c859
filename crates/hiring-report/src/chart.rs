//! SVG charts for KPI results.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::kpi::{ChartKind, KpiResult};

const CHART_SIZE: (u32, u32) = (1000, 600);
const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);
const BAND: f64 = 0.8;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Draw the chart for one KPI into `dir`, returning the written path.
///
/// Empty results produce no chart.
pub fn render_chart(result: &KpiResult, dir: &Path) -> Result<Option<PathBuf>> {
    if result.result.is_empty() {
        debug!(kpi = result.kpi.slug, "no rows, chart skipped");
        return Ok(None);
    }
    fs::create_dir_all(dir).map_err(|source| ReportError::ChartDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format!("{}.svg", result.kpi.slug));
    let drawn = match result.kpi.chart {
        ChartKind::HorizontalBars => draw_bars(&path, result, Orientation::Horizontal),
        ChartKind::VerticalBars => draw_bars(&path, result, Orientation::Vertical),
        ChartKind::Lines => draw_lines(&path, result),
    };
    drawn.map_err(|err| ReportError::Chart {
        path: path.clone(),
        message: err.to_string(),
    })?;
    debug!(kpi = result.kpi.slug, path = %path.display(), "chart written");
    Ok(Some(path))
}

/// Axis position of category `index`; horizontal charts list the first row on top.
fn slot(index: usize, count: usize, orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Horizontal => (count - 1 - index) as f64,
        Orientation::Vertical => index as f64,
    }
}

fn category_label(categories: &[String], position: f64, orientation: Orientation) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    let slot = rounded as usize;
    if slot >= categories.len() {
        return String::new();
    }
    let index = match orientation {
        Orientation::Horizontal => categories.len() - 1 - slot,
        Orientation::Vertical => slot,
    };
    categories[index].clone()
}

fn integral_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 {
        return String::new();
    }
    format!("{}", rounded as i64)
}

/// Upper bound for a value axis with some headroom.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

fn draw_bars(path: &Path, result: &KpiResult, orientation: Orientation) -> DrawResult {
    let kpi = result.kpi;
    let categories = result.categories()?;
    let mut series = Vec::with_capacity(kpi.values.len());
    for column in kpi.values {
        series.push((*column, result.values(*column)?));
    }
    let value_max = axis_max(series.iter().flat_map(|(_, values)| values.iter().copied()));
    let count = categories.len();
    let category_range = -0.5..(count as f64 - 0.5);
    let bar = BAND / series.len() as f64;
    let label_formatter = |position: &f64| category_label(&categories, *position, orientation);
    let tick_hint = count * 2 + 1;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // Each bar is a (category low, category high, value) span; orientation decides the axes.
    let spans = |series_index: usize, values: &[f64]| -> Vec<(f64, f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let low = slot(index, count, orientation) - BAND / 2.0 + bar * series_index as f64;
                (low, low + bar, *value)
            })
            .collect()
    };

    match orientation {
        Orientation::Horizontal => {
            let longest = categories.iter().map(String::len).max().unwrap_or(0);
            let label_area = (longest * 8 + 20).clamp(60, 320) as u32;
            let mut chart = ChartBuilder::on(&root)
                .caption(kpi.title, CAPTION_FONT)
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(label_area)
                .build_cartesian_2d(0f64..value_max, category_range)?;
            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_labels(tick_hint)
                .y_label_formatter(&label_formatter)
                .x_desc(kpi.value_label)
                .draw()?;
            for (index, (name, values)) in series.iter().enumerate() {
                let color = Palette99::pick(index).to_rgba();
                chart
                    .draw_series(spans(index, values).into_iter().map(|(low, high, value)| {
                        Rectangle::new([(0.0, low), (value, high)], color.filled())
                    }))?
                    .label(*name)
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
            }
            if series.len() > 1 {
                chart
                    .configure_series_labels()
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
        }
        Orientation::Vertical => {
            let mut chart = ChartBuilder::on(&root)
                .caption(kpi.title, CAPTION_FONT)
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(category_range, 0f64..value_max)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(tick_hint)
                .x_label_formatter(&label_formatter)
                .x_desc(kpi.category)
                .y_desc(kpi.value_label)
                .draw()?;
            for (index, (name, values)) in series.iter().enumerate() {
                let color = Palette99::pick(index).to_rgba();
                chart
                    .draw_series(spans(index, values).into_iter().map(|(low, high, value)| {
                        Rectangle::new([(low, 0.0), (high, value)], color.filled())
                    }))?
                    .label(*name)
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
            }
            if series.len() > 1 {
                chart
                    .configure_series_labels()
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
        }
    }

    root.present()?;
    Ok(())
}

fn draw_lines(path: &Path, result: &KpiResult) -> DrawResult {
    let kpi = result.kpi;
    let series = result.series()?;
    let xs = || series.iter().flat_map(|(_, points)| points.iter().map(|(x, _)| *x));
    let x_min = xs().fold(f64::INFINITY, f64::min);
    let x_max = xs().fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if x_min.is_finite() { (x_min, x_max) } else { (0.0, 0.0) };
    let y_max = axis_max(series.iter().flat_map(|(_, points)| points.iter().map(|(_, y)| *y)));
    let x_formatter = |value: &f64| integral_label(*value);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(kpi.title, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min - 0.5)..(x_max + 0.5), 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_labels(((x_max - x_min) as usize + 1) * 2 + 1)
        .x_label_formatter(&x_formatter)
        .x_desc(kpi.category)
        .y_desc(kpi.value_label)
        .draw()?;

    for (index, (name, points)) in series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )?;
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_slots_put_first_row_on_top() {
        assert_eq!(slot(0, 3, Orientation::Horizontal), 2.0);
        assert_eq!(slot(2, 3, Orientation::Horizontal), 0.0);
        assert_eq!(slot(1, 3, Orientation::Vertical), 1.0);
    }

    #[test]
    fn category_labels_only_on_whole_slots() {
        let categories = vec!["Rust".to_string(), "Go".to_string()];
        assert_eq!(category_label(&categories, 1.0, Orientation::Horizontal), "Rust");
        assert_eq!(category_label(&categories, 0.0, Orientation::Horizontal), "Go");
        assert_eq!(category_label(&categories, 0.5, Orientation::Vertical), "");
        assert_eq!(category_label(&categories, 2.0, Orientation::Vertical), "");
    }

    #[test]
    fn year_ticks_render_as_integers() {
        assert_eq!(integral_label(2021.0), "2021");
        assert_eq!(integral_label(2021.5), "");
    }

    #[test]
    fn axis_keeps_headroom() {
        assert_eq!(axis_max([].into_iter()), 1.0);
        assert!((axis_max([10.0, 4.0].into_iter()) - 11.0).abs() < 1e-9);
    }
}
