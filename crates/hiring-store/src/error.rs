//! Error types for warehouse storage.

use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open or authenticate the connection.
    #[error("failed to connect to {target}: {message}")]
    Connect { target: String, message: String },

    /// Table or index creation failed.
    #[error("failed to create schema for {table}: {message}")]
    Schema { table: String, message: String },

    /// Writing rows into a table failed.
    #[error("failed to load {table}: {message}")]
    Load { table: String, message: String },

    /// A statement or query failed.
    #[error("query failed: {message}\n  statement: {sql}")]
    Query { sql: String, message: String },

    /// Invalid connection settings.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// Closing the connection failed.
    #[error("failed to close connection: {0}")]
    Close(String),
}

impl StoreError {
    pub(crate) fn query(sql: &str, err: impl std::fmt::Display) -> Self {
        Self::Query {
            sql: sql.trim().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn load(table: &str, err: impl std::fmt::Display) -> Self {
        Self::Load {
            table: table.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn schema(table: &str, err: impl std::fmt::Display) -> Self {
        Self::Schema {
            table: table.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
