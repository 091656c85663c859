//! Dimensional modeling for the hiring warehouse.
//!
//! - **date**: application date parsing
//! - **dimension**: dense-key dimension tables built from source columns
//! - **fact**: inner join of source records into `fact_selection` rows
//! - **star**: the complete warehouse for one run, as loadable tables
//! - **frame**: Polars DataFrame conversion and CSV export

pub mod date;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod frame;
pub mod star;

pub use date::parse_application_date;
pub use dimension::{
    CandidateDimension, DateDimension, Dimension, TextDimension, build_candidate_dimension,
    build_date_dimension, build_text_dimension,
};
pub use error::{Result, TransformError};
pub use fact::{AssemblyStats, DropReason, StarDimensions, assemble_facts};
pub use frame::{table_frame, write_csv_exports};
pub use star::StarSchema;
