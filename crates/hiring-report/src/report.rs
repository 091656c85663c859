//! Running every KPI against a loaded warehouse.

use std::path::PathBuf;

use hiring_store::Backend;
use tracing::{error, info, info_span};

use crate::chart::render_chart;
use crate::error::ReportError;
use crate::kpi::{KPIS, KpiResult, run_kpi};

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Where SVG charts go; `None` skips charts.
    pub chart_dir: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ReportOutcome {
    pub results: Vec<KpiResult>,
    pub charts: Vec<PathBuf>,
    pub failures: Vec<(&'static str, ReportError)>,
}

impl ReportOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn result(&self, slug: &str) -> Option<&KpiResult> {
        self.results.iter().find(|result| result.kpi.slug == slug)
    }
}

/// Run all KPIs in order. A failing KPI is logged and skipped; the rest still run.
pub fn run_report(backend: &mut dyn Backend, options: &ReportOptions) -> ReportOutcome {
    let span = info_span!("report", backend = %backend.kind());
    let _guard = span.enter();

    let mut outcome = ReportOutcome::default();
    for kpi in KPIS {
        let result = match run_kpi(backend, kpi) {
            Ok(result) => result,
            Err(err) => {
                error!(kpi = kpi.slug, error = %err, "KPI skipped");
                outcome.failures.push((kpi.slug, err));
                continue;
            }
        };
        if let Some(dir) = &options.chart_dir {
            match render_chart(&result, dir) {
                Ok(Some(path)) => outcome.charts.push(path),
                Ok(None) => {}
                Err(err) => {
                    error!(kpi = kpi.slug, error = %err, "chart failed");
                    outcome.failures.push((kpi.slug, err));
                }
            }
        }
        outcome.results.push(result);
    }
    info!(
        kpis = outcome.results.len(),
        charts = outcome.charts.len(),
        failures = outcome.failures.len(),
        "report finished"
    );
    outcome
}
