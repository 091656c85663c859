//! KPI reporting over the hiring warehouse.
//!
//! Six fixed read-only queries run against a loaded star schema. Each result
//! renders as a terminal table (comfy-table) and an SVG chart (plotters).

pub mod chart;
pub mod error;
pub mod kpi;
pub mod report;
pub mod table;

pub use chart::render_chart;
pub use error::{ReportError, Result};
pub use kpi::{
    AVERAGE_SCORES_BY_SENIORITY, ChartKind, HIRE_RATE_BY_TECHNOLOGY, HIRES_BY_COUNTRY_YEAR,
    HIRES_BY_SENIORITY, HIRES_BY_TECHNOLOGY, HIRES_BY_YEAR, KPIS, Kpi, KpiResult,
    TRACKED_COUNTRIES, run_kpi,
};
pub use report::{ReportOptions, ReportOutcome, run_report};
pub use table::{kpi_table, render_kpi};
