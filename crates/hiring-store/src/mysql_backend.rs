//! MySQL backend on top of the `mysql` client.

use hiring_model::{Cell, QueryResult, TableRows};
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder, TxOpts, Value};
use tracing::{debug, info};

use crate::backend::{Backend, ColumnInfo, TableInfo};
use crate::config::{BackendKind, MySqlConfig};
use crate::dialect::Dialect;
use crate::error::{Result, StoreError};

pub struct MySqlBackend {
    conn: Conn,
}

impl MySqlBackend {
    /// Connect to the server and select the configured database, creating it
    /// when it does not exist yet.
    pub fn connect(config: &MySqlConfig) -> Result<Self> {
        config.validate()?;
        let connect_err = |err: mysql::Error| StoreError::Connect {
            target: config.target(),
            message: err.to_string(),
        };
        let server = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.clone()))
            .tcp_port(config.port)
            .user(Some(config.user.clone()))
            .pass(Some(config.password.clone()));

        let mut bootstrap = Conn::new(server.clone()).map_err(connect_err)?;
        let create = format!("CREATE DATABASE IF NOT EXISTS `{}`", config.database);
        bootstrap
            .query_drop(&create)
            .map_err(|err| StoreError::query(&create, err))?;
        drop(bootstrap);
        info!(database = %config.database, "database ensured");

        let conn = Conn::new(server.db_name(Some(config.database.clone()))).map_err(connect_err)?;
        Ok(Self { conn })
    }
}

fn to_mysql(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::NULL,
        Cell::Integer(v) => Value::Int(*v),
        Cell::Real(v) => Value::Double(*v),
        Cell::Text(v) => Value::Bytes(v.clone().into_bytes()),
    }
}

fn from_mysql(value: Value) -> Cell {
    match value {
        Value::NULL => Cell::Null,
        Value::Int(v) => Cell::Integer(v),
        Value::UInt(v) => i64::try_from(v).map_or(Cell::Real(v as f64), Cell::Integer),
        Value::Float(v) => Cell::Real(f64::from(v)),
        Value::Double(v) => Cell::Real(v),
        Value::Bytes(bytes) => Cell::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Date(year, month, day, hour, minute, second, _) => {
            if hour == 0 && minute == 0 && second == 0 {
                Cell::Text(format!("{year:04}-{month:02}-{day:02}"))
            } else {
                Cell::Text(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            }
        }
        Value::Time(negative, days, hours, minutes, seconds, _) => {
            let sign = if negative { "-" } else { "" };
            let hours = u32::from(hours) + days * 24;
            Cell::Text(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
        }
    }
}

impl Backend for MySqlBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Mysql
    }

    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn execute(&mut self, sql: &str) -> Result<u64> {
        self.conn
            .query_drop(sql)
            .map_err(|err| StoreError::query(sql, err))?;
        Ok(self.conn.affected_rows())
    }

    fn query(&mut self, sql: &str) -> Result<QueryResult> {
        let query_err = |err: mysql::Error| StoreError::query(sql, err);
        let result = self.conn.query_iter(sql).map_err(query_err)?;
        let columns: Vec<String> = result
            .columns()
            .as_ref()
            .iter()
            .map(|column| column.name_str().into_owned())
            .collect();
        let mut rows = Vec::new();
        for row in result {
            let row = row.map_err(query_err)?;
            rows.push(row.unwrap().into_iter().map(from_mysql).collect());
        }
        debug!(rows = rows.len(), "query returned");
        Ok(QueryResult { columns, rows })
    }

    fn replace_table(&mut self, table: &TableRows) -> Result<usize> {
        let spec = table.spec;
        let dialect = Dialect::MySql;
        let load_err = |err: mysql::Error| StoreError::load(spec.name, err);
        let schema_err = |err: mysql::Error| StoreError::schema(spec.name, err);

        // DDL commits implicitly in MySQL, so only the inserts share a transaction.
        self.conn
            .query_drop(dialect.drop_table_sql(spec))
            .map_err(load_err)?;
        self.conn
            .query_drop(dialect.create_table_sql(spec))
            .map_err(schema_err)?;
        for index in dialect.create_index_sql(spec) {
            self.conn.query_drop(index).map_err(schema_err)?;
        }

        let insert = dialect.insert_sql(spec);
        let mut tx = self
            .conn
            .start_transaction(TxOpts::default())
            .map_err(load_err)?;
        tx.exec_batch(
            insert.as_str(),
            table
                .rows
                .iter()
                .map(|row| row.iter().map(to_mysql).collect::<Vec<_>>()),
        )
        .map_err(load_err)?;
        tx.commit().map_err(load_err)?;
        debug!(table = spec.name, rows = table.len(), "table replaced");
        Ok(table.len())
    }

    fn table_info(&mut self) -> Result<Vec<TableInfo>> {
        let tables = self.query("SHOW TABLES")?;
        let mut names: Vec<String> = tables
            .rows
            .iter()
            .filter_map(|row| row.first().map(ToString::to_string))
            .collect();
        names.sort();

        let mut info = Vec::with_capacity(names.len());
        for name in names {
            let described = self.query(&format!("DESCRIBE `{name}`"))?;
            let (Some(field_idx), Some(type_idx), Some(key_idx)) = (
                described.column_index("Field"),
                described.column_index("Type"),
                described.column_index("Key"),
            ) else {
                continue;
            };
            let columns = described
                .rows
                .iter()
                .map(|column| ColumnInfo {
                    name: column[field_idx].to_string(),
                    sql_type: column[type_idx].to_string(),
                    primary_key: column[key_idx].as_str() == Some("PRI"),
                })
                .collect();
            info.push(TableInfo { name, columns });
        }
        Ok(info)
    }

    fn close(self: Box<Self>) -> Result<()> {
        drop(self.conn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_to_wire_values() {
        assert_eq!(to_mysql(&Cell::Null), Value::NULL);
        assert_eq!(to_mysql(&Cell::Integer(3)), Value::Int(3));
        assert_eq!(
            to_mysql(&Cell::Text("Go".to_string())),
            Value::Bytes(b"Go".to_vec())
        );
    }

    #[test]
    fn dates_come_back_as_iso_text() {
        let cell = from_mysql(Value::Date(2021, 3, 4, 0, 0, 0, 0));
        assert_eq!(cell, Cell::Text("2021-03-04".to_string()));
    }

    #[test]
    fn unsigned_values_fit_integers() {
        assert_eq!(from_mysql(Value::UInt(42)), Cell::Integer(42));
    }
}
