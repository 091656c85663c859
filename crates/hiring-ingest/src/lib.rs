//! Candidate file ingestion.
//!
//! Reads the semicolon-delimited candidates file into a Polars DataFrame and
//! converts it into typed [`ApplicationRecord`](hiring_model::ApplicationRecord)s.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hiring_ingest::{IngestOptions, read_application_records};
//!
//! let records = read_application_records(Path::new("data/candidates.csv"), IngestOptions::default())?;
//! ```

mod error;
mod polars_utils;
mod reader;
mod records;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{DEFAULT_SEPARATOR, IngestOptions, read_candidates_frame, validate_encoding};

// === Record Conversion ===
pub use records::{read_application_records, records_from_frame};

// === Value Helpers ===
pub use polars_utils::{any_to_f64, any_to_i64, any_to_string_non_empty, parse_f64, parse_i64};
