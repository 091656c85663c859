//! SQLite backend on top of rusqlite.

use std::fs;
use std::path::{Path, PathBuf};

use hiring_model::{Cell, QueryResult, TableRows};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tracing::debug;

use crate::backend::{Backend, ColumnInfo, TableInfo};
use crate::config::BackendKind;
use crate::dialect::Dialect;
use crate::error::{Result, StoreError};

pub struct SqliteBackend {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteBackend {
    /// Open (or create) a database file, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self> {
        let connect_err = |message: String| StoreError::Connect {
            target: path.display().to_string(),
            message,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| connect_err(err.to_string()))?;
        }
        let conn = Connection::open(path).map_err(|err| connect_err(err.to_string()))?;
        Self::configure(conn, Some(path.to_path_buf()))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|err| StoreError::Connect {
            target: ":memory:".to_string(),
            message: err.to_string(),
        })?;
        Self::configure(conn, None)
    }

    fn configure(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        let sql = Dialect::Sqlite.foreign_keys_sql(true);
        conn.execute_batch(sql)
            .map_err(|err| StoreError::query(sql, err))?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn to_sqlite(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Integer(v) => Value::Integer(*v),
        Cell::Real(v) => Value::Real(*v),
        Cell::Text(v) => Value::Text(v.clone()),
    }
}

fn from_sqlite(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Integer(v) => Cell::Integer(v),
        Value::Real(v) => Cell::Real(v),
        Value::Text(v) => Cell::Text(v),
        Value::Blob(bytes) => Cell::Text(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

impl Backend for SqliteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str) -> Result<u64> {
        let changed = self
            .conn
            .execute(sql, [])
            .map_err(|err| StoreError::query(sql, err))?;
        Ok(changed as u64)
    }

    fn query(&mut self, sql: &str) -> Result<QueryResult> {
        let query_err = |err: rusqlite::Error| StoreError::query(sql, err);
        let mut stmt = self.conn.prepare(sql).map_err(query_err)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let width = columns.len();
        let mut rows = stmt.query([]).map_err(query_err)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(query_err)? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                let value: Value = row.get(idx).map_err(query_err)?;
                values.push(from_sqlite(value));
            }
            out.push(values);
        }
        debug!(rows = out.len(), "query returned");
        Ok(QueryResult { columns, rows: out })
    }

    fn replace_table(&mut self, table: &TableRows) -> Result<usize> {
        let spec = table.spec;
        let dialect = Dialect::Sqlite;
        let load_err = |err: rusqlite::Error| StoreError::load(spec.name, err);

        let tx = self.conn.transaction().map_err(load_err)?;
        tx.execute_batch(&dialect.drop_table_sql(spec))
            .map_err(load_err)?;
        tx.execute_batch(&dialect.create_table_sql(spec))
            .map_err(|err| StoreError::schema(spec.name, err))?;
        for index in dialect.create_index_sql(spec) {
            tx.execute_batch(&index)
                .map_err(|err| StoreError::schema(spec.name, err))?;
        }
        {
            let mut insert = tx.prepare(&dialect.insert_sql(spec)).map_err(load_err)?;
            for row in &table.rows {
                insert
                    .execute(params_from_iter(row.iter().map(to_sqlite)))
                    .map_err(load_err)?;
            }
        }
        tx.commit().map_err(load_err)?;
        debug!(table = spec.name, rows = table.len(), "table replaced");
        Ok(table.len())
    }

    fn table_info(&mut self) -> Result<Vec<TableInfo>> {
        let tables = self.query(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let mut info = Vec::with_capacity(tables.len());
        for row in &tables.rows {
            let Some(name) = row.first().and_then(Cell::as_str) else {
                continue;
            };
            let pragma = self.query(&format!("PRAGMA table_info({name})"))?;
            let (Some(name_idx), Some(type_idx), Some(pk_idx)) = (
                pragma.column_index("name"),
                pragma.column_index("type"),
                pragma.column_index("pk"),
            ) else {
                continue;
            };
            let columns = pragma
                .rows
                .iter()
                .map(|column| ColumnInfo {
                    name: column[name_idx].to_string(),
                    sql_type: column[type_idx].to_string(),
                    primary_key: column[pk_idx].as_i64().unwrap_or(0) > 0,
                })
                .collect();
            info.push(TableInfo {
                name: name.to_string(),
                columns,
            });
        }
        Ok(info)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| StoreError::Close(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_keys_are_enforced_on_open() {
        let mut backend = SqliteBackend::open_in_memory().unwrap();
        let result = backend.query("PRAGMA foreign_keys").unwrap();
        assert_eq!(result.rows, vec![vec![Cell::Integer(1)]]);
    }

    #[test]
    fn query_reports_statement_on_error() {
        let mut backend = SqliteBackend::open_in_memory().unwrap();
        let err = backend.query("SELECT * FROM missing_table").unwrap_err();
        assert!(err.to_string().contains("missing_table"));
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("warehouse.db");
        let backend = SqliteBackend::open(&path).unwrap();
        assert_eq!(backend.path(), Some(path.as_path()));
        assert!(path.exists());
        Box::new(backend).close().unwrap();
    }
}
