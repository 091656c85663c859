//! The fixed set of warehouse KPIs.

use hiring_model::{Cell, QueryResult};
use hiring_store::Backend;
use tracing::{debug, info_span};

use crate::error::{ReportError, Result};

/// Countries tracked by the country-by-year KPI.
pub const TRACKED_COUNTRIES: [&str; 4] = [
    "United States of America",
    "Brazil",
    "Colombia",
    "Ecuador",
];

/// How a KPI result is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One bar per category along the vertical axis.
    HorizontalBars,
    /// One bar per category along the horizontal axis.
    VerticalBars,
    /// One line per value of the series column.
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kpi {
    /// File stem for the chart.
    pub slug: &'static str,
    pub title: &'static str,
    pub sql: &'static str,
    pub chart: ChartKind,
    /// Category column (x for lines).
    pub category: &'static str,
    /// Plotted value columns; several columns make grouped bars.
    pub values: &'static [&'static str],
    /// Column splitting rows into separate lines.
    pub series: Option<&'static str>,
    pub value_label: &'static str,
}

pub const HIRES_BY_TECHNOLOGY: Kpi = Kpi {
    slug: "hires_by_technology",
    title: "Hires by Technology",
    sql: "SELECT dt.technology, COUNT(fs.selection_id) AS hires
FROM fact_selection fs
JOIN dim_technology dt ON fs.technology_id = dt.technology_id
WHERE fs.hired = 1
GROUP BY dt.technology
ORDER BY hires DESC",
    chart: ChartKind::HorizontalBars,
    category: "technology",
    values: &["hires"],
    series: None,
    value_label: "Hires",
};

pub const HIRES_BY_YEAR: Kpi = Kpi {
    slug: "hires_by_year",
    title: "Hires by Year",
    sql: "SELECT dd.year, COUNT(fs.selection_id) AS hires
FROM fact_selection fs
JOIN dim_date dd ON fs.date_id = dd.date_id
WHERE fs.hired = 1
GROUP BY dd.year
ORDER BY dd.year",
    chart: ChartKind::VerticalBars,
    category: "year",
    values: &["hires"],
    series: None,
    value_label: "Hires",
};

pub const HIRES_BY_SENIORITY: Kpi = Kpi {
    slug: "hires_by_seniority",
    title: "Hires by Seniority",
    sql: "SELECT ds.seniority, COUNT(fs.selection_id) AS hires
FROM fact_selection fs
JOIN dim_seniority ds ON fs.seniority_id = ds.seniority_id
WHERE fs.hired = 1
GROUP BY ds.seniority
ORDER BY hires DESC",
    chart: ChartKind::HorizontalBars,
    category: "seniority",
    values: &["hires"],
    series: None,
    value_label: "Hires",
};

pub const HIRES_BY_COUNTRY_YEAR: Kpi = Kpi {
    slug: "hires_by_country_year",
    title: "Hires by Country and Year",
    sql: "SELECT dc.country, dd.year, COUNT(fs.selection_id) AS hires
FROM fact_selection fs
JOIN dim_country dc ON fs.country_id = dc.country_id
JOIN dim_date dd ON fs.date_id = dd.date_id
WHERE fs.hired = 1
  AND dc.country IN ('United States of America', 'Brazil', 'Colombia', 'Ecuador')
GROUP BY dc.country, dd.year
ORDER BY dc.country, dd.year",
    chart: ChartKind::Lines,
    category: "year",
    values: &["hires"],
    series: Some("country"),
    value_label: "Hires",
};

pub const HIRE_RATE_BY_TECHNOLOGY: Kpi = Kpi {
    slug: "hire_rate_by_technology",
    title: "Hire Rate by Technology",
    sql: "SELECT dt.technology,
       SUM(fs.hired) AS hires,
       COUNT(fs.selection_id) AS total_candidates,
       ROUND(SUM(fs.hired) * 100.0 / COUNT(fs.selection_id), 2) AS hire_rate
FROM fact_selection fs
JOIN dim_technology dt ON fs.technology_id = dt.technology_id
GROUP BY dt.technology
ORDER BY hire_rate DESC",
    chart: ChartKind::HorizontalBars,
    category: "technology",
    values: &["hire_rate"],
    series: None,
    value_label: "Hire rate (%)",
};

pub const AVERAGE_SCORES_BY_SENIORITY: Kpi = Kpi {
    slug: "average_scores_by_seniority",
    title: "Average Scores by Seniority",
    sql: "SELECT ds.seniority,
       ROUND(AVG(fs.code_challenge_score), 2) AS avg_code_score,
       ROUND(AVG(fs.interview_score), 2) AS avg_interview_score
FROM fact_selection fs
JOIN dim_seniority ds ON fs.seniority_id = ds.seniority_id
GROUP BY ds.seniority
ORDER BY avg_code_score DESC",
    chart: ChartKind::HorizontalBars,
    category: "seniority",
    values: &["avg_code_score", "avg_interview_score"],
    series: None,
    value_label: "Average score",
};

/// Every KPI in report order.
pub const KPIS: [&Kpi; 6] = [
    &HIRES_BY_TECHNOLOGY,
    &HIRES_BY_YEAR,
    &HIRES_BY_SENIORITY,
    &HIRES_BY_COUNTRY_YEAR,
    &HIRE_RATE_BY_TECHNOLOGY,
    &AVERAGE_SCORES_BY_SENIORITY,
];

/// A KPI together with the rows its query returned.
#[derive(Debug, Clone)]
pub struct KpiResult {
    pub kpi: &'static Kpi,
    pub result: QueryResult,
}

impl KpiResult {
    pub fn column_index(&self, column: &'static str) -> Result<usize> {
        self.result
            .column_index(column)
            .ok_or(ReportError::MissingColumn {
                kpi: self.kpi.slug,
                column,
            })
    }

    /// Category labels in row order.
    pub fn categories(&self) -> Result<Vec<String>> {
        let idx = self.column_index(self.kpi.category)?;
        Ok(self.result.rows.iter().map(|row| row[idx].to_string()).collect())
    }

    /// Numeric values of one column in row order; nulls read as zero.
    pub fn values(&self, column: &'static str) -> Result<Vec<f64>> {
        let idx = self.column_index(column)?;
        Ok(self
            .result
            .rows
            .iter()
            .map(|row| row[idx].as_f64().unwrap_or(0.0))
            .collect())
    }

    /// Rows grouped by the series column, keeping first-seen order.
    pub fn series(&self) -> Result<Vec<(String, Vec<(f64, f64)>)>> {
        let Some(series_column) = self.kpi.series else {
            return Ok(Vec::new());
        };
        let series_idx = self.column_index(series_column)?;
        let x_idx = self.column_index(self.kpi.category)?;
        let y_idx = self.column_index(self.kpi.values[0])?;

        let mut grouped: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
        for row in &self.result.rows {
            let (Some(x), Some(y)) = (row[x_idx].as_f64(), row[y_idx].as_f64()) else {
                continue;
            };
            let name = row[series_idx].to_string();
            match grouped.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, points)) => points.push((x, y)),
                None => grouped.push((name, vec![(x, y)])),
            }
        }
        Ok(grouped)
    }

    /// Look up a single value by category label.
    pub fn value_for(&self, category: &str, column: &'static str) -> Option<&Cell> {
        let category_idx = self.result.column_index(self.kpi.category)?;
        let value_idx = self.result.column_index(column)?;
        self.result
            .rows
            .iter()
            .find(|row| row[category_idx].to_string() == category)
            .map(|row| &row[value_idx])
    }
}

pub fn run_kpi(backend: &mut dyn Backend, kpi: &'static Kpi) -> Result<KpiResult> {
    let span = info_span!("kpi", kpi = kpi.slug);
    let _guard = span.enter();
    let result = backend.query(kpi.sql).map_err(|source| ReportError::Query {
        kpi: kpi.slug,
        source,
    })?;
    debug!(rows = result.len(), "KPI computed");
    Ok(KpiResult { kpi, result })
}
