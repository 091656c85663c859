//! Data model for the hiring warehouse.
//!
//! - **record**: flat application records read from the candidates file
//! - **star**: dimension and fact rows of the star schema
//! - **schema**: static table descriptions shared by storage and export
//! - **value**: backend-neutral cells, row sets and query results
//! - **privacy**: redaction switch for row-level log output

pub mod error;
pub mod ids;
pub mod privacy;
pub mod record;
pub mod schema;
pub mod star;
pub mod value;

pub use error::{ModelError, Result};
pub use ids::SurrogateKey;
pub use record::{ApplicationRecord, SourceColumn};
pub use schema::{
    ColumnSpec, ColumnType, DIM_CANDIDATE, DIM_COUNTRY, DIM_DATE, DIM_SENIORITY, DIM_TECHNOLOGY,
    DIMENSION_TABLES, FACT_SELECTION, ForeignKey, IndexSpec, STAR_TABLES, TableSpec,
    table_by_name,
};
pub use star::{
    CandidateProfile, DateAttributes, DimensionEntry, FactSelection, HIRE_THRESHOLD, is_hired,
};
pub use value::{Cell, QueryResult, TableRows, format_numeric};
