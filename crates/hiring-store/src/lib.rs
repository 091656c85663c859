//! Relational storage for the hiring warehouse.
//!
//! A [`Backend`] owns one connection to SQLite or MySQL. Table DDL is rendered
//! per [`Dialect`] from the static table descriptions in `hiring_model`, and
//! [`load_star_schema`] replaces the warehouse contents in dependency order.

pub mod backend;
pub mod config;
pub mod dialect;
pub mod error;
pub mod load;
pub mod mysql_backend;
pub mod sqlite_backend;

pub use backend::{Backend, ColumnInfo, TableInfo, connect, with_backend};
pub use config::{
    BackendKind, DEFAULT_MYSQL_DATABASE, DEFAULT_MYSQL_HOST, DEFAULT_MYSQL_PORT,
    DEFAULT_MYSQL_USER, DEFAULT_SQLITE_PATH, MySqlConfig, StoreConfig,
};
pub use dialect::Dialect;
pub use error::{Result, StoreError};
pub use load::{LoadSummary, load_star_schema};
pub use mysql_backend::MySqlBackend;
pub use sqlite_backend::SqliteBackend;
