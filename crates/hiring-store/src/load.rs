//! Loading a transformed star schema into a backend.

use std::time::{Duration, Instant};

use hiring_model::{FACT_SELECTION, TableRows};
use tracing::{info, info_span};

use crate::backend::Backend;
use crate::error::Result;

/// Rows written per table, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub tables: Vec<(&'static str, usize)>,
    pub elapsed: Duration,
}

impl LoadSummary {
    pub fn rows(&self, table: &str) -> Option<usize> {
        self.tables
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, rows)| *rows)
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|(_, rows)| rows).sum()
    }
}

/// Replace every warehouse table with the given rows.
///
/// The fact table is dropped first with foreign-key enforcement off so the
/// dimensions can be replaced, then reloaded last against the new keys.
pub fn load_star_schema(backend: &mut dyn Backend, tables: &[TableRows]) -> Result<LoadSummary> {
    let span = info_span!("load", backend = %backend.kind(), tables = tables.len());
    let _guard = span.enter();
    let start = Instant::now();

    backend.set_foreign_keys(false)?;
    let dropped = backend.drop_table(&FACT_SELECTION);
    let restored = backend.set_foreign_keys(true);
    dropped?;
    restored?;

    let (facts, dimensions): (Vec<&TableRows>, Vec<&TableRows>) =
        tables.iter().partition(|table| table.spec.is_fact());

    let mut summary = LoadSummary::default();
    for table in dimensions.into_iter().chain(facts) {
        let rows = backend.replace_table(table)?;
        info!(table = table.name(), rows, "table loaded");
        summary.tables.push((table.name(), rows));
    }
    summary.elapsed = start.elapsed();
    info!(
        rows = summary.total_rows(),
        elapsed_ms = summary.elapsed.as_millis(),
        "star schema loaded"
    );
    Ok(summary)
}
