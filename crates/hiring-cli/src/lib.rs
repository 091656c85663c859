//! CLI library components for the hiring warehouse ETL.

pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
