//! Error types for KPI reporting.

use std::path::PathBuf;

use hiring_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("KPI '{kpi}' query failed: {source}")]
    Query {
        kpi: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("KPI '{kpi}' result has no column '{column}'")]
    MissingColumn {
        kpi: &'static str,
        column: &'static str,
    },

    #[error("failed to create chart directory {path}: {source}")]
    ChartDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to draw chart {path}: {message}")]
    Chart { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
