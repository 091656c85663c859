//! Backend abstraction over the warehouse connection.

use hiring_model::{QueryResult, STAR_TABLES, TableRows, TableSpec};
use tracing::{debug, info};

use crate::config::{BackendKind, StoreConfig};
use crate::dialect::Dialect;
use crate::error::{Result, StoreError};
use crate::mysql_backend::MySqlBackend;
use crate::sqlite_backend::SqliteBackend;

/// Column as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub sql_type: String,
    pub primary_key: bool,
}

/// Table as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

/// An open warehouse connection.
///
/// Implementations own exactly one connection; `close` releases it.
pub trait Backend {
    fn kind(&self) -> BackendKind;

    fn dialect(&self) -> Dialect;

    /// Run a statement, returning the number of affected rows.
    fn execute(&mut self, sql: &str) -> Result<u64>;

    /// Run a read query and collect every row.
    fn query(&mut self, sql: &str) -> Result<QueryResult>;

    /// Drop, recreate and fill one table inside a single transaction.
    ///
    /// Returns the number of rows written.
    fn replace_table(&mut self, table: &TableRows) -> Result<usize>;

    /// Tables and columns currently present, sorted by table name.
    fn table_info(&mut self) -> Result<Vec<TableInfo>>;

    fn close(self: Box<Self>) -> Result<()>;

    fn set_foreign_keys(&mut self, enabled: bool) -> Result<()> {
        let sql = self.dialect().foreign_keys_sql(enabled);
        self.execute(sql)?;
        debug!(enabled, "foreign key enforcement toggled");
        Ok(())
    }

    fn drop_table(&mut self, table: &TableSpec) -> Result<()> {
        let sql = self.dialect().drop_table_sql(table);
        self.execute(&sql)?;
        Ok(())
    }

    /// Drop and recreate every warehouse table with keys, checks and indexes.
    fn create_schema(&mut self) -> Result<()> {
        let dialect = self.dialect();
        self.set_foreign_keys(false)?;
        let created = create_tables(self, dialect);
        let restored = self.set_foreign_keys(true);
        created?;
        restored?;
        info!(backend = %self.kind(), tables = STAR_TABLES.len(), "schema created");
        Ok(())
    }
}

fn create_tables<B: Backend + ?Sized>(backend: &mut B, dialect: Dialect) -> Result<()> {
    for table in STAR_TABLES.iter().rev() {
        backend.drop_table(table)?;
    }
    for table in STAR_TABLES {
        let ddl = dialect.create_table_sql(table);
        backend
            .execute(&ddl)
            .map_err(|err| StoreError::schema(table.name, err))?;
        for index in dialect.create_index_sql(table) {
            backend
                .execute(&index)
                .map_err(|err| StoreError::schema(table.name, err))?;
        }
    }
    Ok(())
}

/// Open a connection for the given target.
pub fn connect(config: &StoreConfig) -> Result<Box<dyn Backend>> {
    let backend: Box<dyn Backend> = match config {
        StoreConfig::Sqlite { path } => Box::new(SqliteBackend::open(path)?),
        StoreConfig::MySql(mysql) => Box::new(MySqlBackend::connect(mysql)?),
    };
    info!(backend = %config.kind(), target = %config.target(), "connected");
    Ok(backend)
}

/// Run `f` against a fresh connection and close it afterwards, even on error.
pub fn with_backend<T, E>(
    config: &StoreConfig,
    f: impl FnOnce(&mut dyn Backend) -> std::result::Result<T, E>,
) -> std::result::Result<T, E>
where
    E: From<StoreError>,
{
    let mut backend = connect(config)?;
    let outcome = f(backend.as_mut());
    let closed = backend.close();
    let value = outcome?;
    closed?;
    Ok(value)
}
