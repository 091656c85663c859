//! Command implementations. Each returns its outcome for the caller to print.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use hiring_ingest::{IngestOptions, read_application_records};
use hiring_report::{ReportOptions, ReportOutcome, run_report};
use hiring_store::{LoadSummary, StoreError, TableInfo, load_star_schema, with_backend};
use hiring_transform::{AssemblyStats, StarSchema, write_csv_exports};
use tracing::{info, info_span};

use crate::config::Settings;

/// What a `load` or `transform` run produced.
#[derive(Debug, Clone)]
pub struct EtlOutcome {
    pub input: PathBuf,
    pub stats: AssemblyStats,
    /// Row counts per dimension table, in load order.
    pub dimensions: Vec<(&'static str, usize)>,
    /// `None` when nothing was written to a database.
    pub load: Option<LoadSummary>,
    pub exports: Vec<PathBuf>,
}

/// Ingest the candidates file and build the star schema in memory.
pub fn build_star(input: &Path, separator: u8) -> Result<StarSchema> {
    let options = IngestOptions::default().with_separator(separator);
    let records = read_application_records(input, options)
        .with_context(|| format!("read candidates file {}", input.display()))?;
    Ok(StarSchema::build(&records))
}

fn export(star: &StarSchema, dir: &Path) -> Result<Vec<PathBuf>> {
    let paths = write_csv_exports(star, dir)
        .with_context(|| format!("write CSV exports to {}", dir.display()))?;
    info!(dir = %dir.display(), files = paths.len(), "CSV exports written");
    Ok(paths)
}

fn dimension_counts(star: &StarSchema) -> Vec<(&'static str, usize)> {
    let dims = &star.dimensions;
    vec![
        ("dim_technology", dims.technology.len()),
        ("dim_seniority", dims.seniority.len()),
        ("dim_country", dims.country.len()),
        ("dim_date", dims.date.len()),
        ("dim_candidate", dims.candidate.len()),
    ]
}

/// Full ETL: read, transform, optionally export CSVs, and replace the warehouse tables.
pub fn run_load(settings: &Settings, export_dir: Option<&Path>) -> Result<EtlOutcome> {
    let span = info_span!(
        "load",
        input = %settings.input.display(),
        backend = %settings.store.kind()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let star = build_star(&settings.input, settings.separator)?;
    let tables = star.to_tables().context("build warehouse tables")?;
    let exports = match export_dir {
        Some(dir) => export(&star, dir)?,
        None => Vec::new(),
    };
    let load = with_backend(&settings.store, |backend| {
        load_star_schema(backend, &tables)
    })
    .with_context(|| format!("load warehouse at {}", settings.store.target()))?;

    info!(elapsed_ms = start.elapsed().as_millis(), "load finished");
    Ok(EtlOutcome {
        input: settings.input.clone(),
        dimensions: dimension_counts(&star),
        stats: star.stats,
        load: Some(load),
        exports,
    })
}

/// Build the star schema and write it as CSV files without touching a database.
pub fn run_transform(settings: &Settings, export_dir: &Path) -> Result<EtlOutcome> {
    let span = info_span!("transform", input = %settings.input.display());
    let _guard = span.enter();

    let star = build_star(&settings.input, settings.separator)?;
    let exports = export(&star, export_dir)?;
    Ok(EtlOutcome {
        input: settings.input.clone(),
        dimensions: dimension_counts(&star),
        stats: star.stats,
        load: None,
        exports,
    })
}

/// Run every KPI against the configured warehouse.
pub fn run_kpi_report(settings: &Settings) -> Result<ReportOutcome> {
    let options = ReportOptions {
        chart_dir: settings.chart_dir.clone(),
    };
    with_backend(&settings.store, |backend| {
        Ok::<_, StoreError>(run_report(backend, &options))
    })
    .with_context(|| format!("report from warehouse at {}", settings.store.target()))
}

/// Drop and recreate the warehouse schema, then describe it.
pub fn run_schema(settings: &Settings) -> Result<Vec<TableInfo>> {
    with_backend(&settings.store, |backend| {
        backend.create_schema()?;
        backend.table_info()
    })
    .with_context(|| format!("create schema at {}", settings.store.target()))
}
