//! SQL generation per backend from the static table descriptions.

use hiring_model::{ColumnSpec, ColumnType, TableSpec};

/// SQL flavour spoken by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    MySql,
}

impl Dialect {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqlite => "SQLite",
            Self::MySql => "MySQL",
        }
    }

    fn column_type(self, column: &ColumnSpec) -> &'static str {
        match (self, column.ty) {
            (Self::Sqlite, ColumnType::Key | ColumnType::Integer | ColumnType::Flag) => "INTEGER",
            (Self::Sqlite, ColumnType::Score) => "REAL",
            (Self::Sqlite, ColumnType::Text) => "TEXT",
            (Self::Sqlite, ColumnType::Date) => "DATE",
            (Self::MySql, ColumnType::Key | ColumnType::Integer) => "INT",
            (Self::MySql, ColumnType::Score) => "DOUBLE",
            // Natural keys dedupe on exact bytes, so the UNIQUE index must not fold
            // case or accents. 768 utf8mb4 chars is the InnoDB index key limit.
            (Self::MySql, ColumnType::Text) if column.unique => {
                "VARCHAR(768) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin"
            }
            (Self::MySql, ColumnType::Text) => "TEXT",
            (Self::MySql, ColumnType::Date) => "DATE",
            (Self::MySql, ColumnType::Flag) => "TINYINT(1)",
        }
    }

    fn column_sql(self, table: &TableSpec, column: &ColumnSpec) -> String {
        let mut sql = format!("{} {}", column.name, self.column_type(column));
        if column.name == table.primary_key {
            sql.push_str(" PRIMARY KEY");
        } else {
            if !column.nullable {
                sql.push_str(" NOT NULL");
            }
            if column.unique {
                sql.push_str(" UNIQUE");
            }
        }
        if column.ty == ColumnType::Flag {
            sql.push_str(&format!(" CHECK ({} IN (0, 1))", column.name));
        }
        sql
    }

    pub fn create_table_sql(self, table: &TableSpec) -> String {
        let mut lines: Vec<String> = table
            .columns
            .iter()
            .map(|column| format!("    {}", self.column_sql(table, column)))
            .collect();
        for fk in table.foreign_keys {
            lines.push(format!(
                "    FOREIGN KEY ({}) REFERENCES {} ({})",
                fk.column, fk.table, fk.references
            ));
        }
        let suffix = match self {
            Self::Sqlite => "",
            Self::MySql => " ENGINE=InnoDB",
        };
        format!("CREATE TABLE {} (\n{}\n){}", table.name, lines.join(",\n"), suffix)
    }

    pub fn create_index_sql(self, table: &TableSpec) -> Vec<String> {
        table
            .indexes
            .iter()
            .map(|index| {
                format!(
                    "CREATE INDEX {} ON {} ({})",
                    index.name, table.name, index.column
                )
            })
            .collect()
    }

    pub fn drop_table_sql(self, table: &TableSpec) -> String {
        format!("DROP TABLE IF EXISTS {}", table.name)
    }

    pub fn insert_sql(self, table: &TableSpec) -> String {
        let placeholders = vec!["?"; table.width()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name,
            table.column_names().join(", "),
            placeholders
        )
    }

    pub const fn foreign_keys_sql(self, enabled: bool) -> &'static str {
        match (self, enabled) {
            (Self::Sqlite, true) => "PRAGMA foreign_keys = ON",
            (Self::Sqlite, false) => "PRAGMA foreign_keys = OFF",
            (Self::MySql, true) => "SET FOREIGN_KEY_CHECKS = 1",
            (Self::MySql, false) => "SET FOREIGN_KEY_CHECKS = 0",
        }
    }

    /// Full DDL script for the given tables, in order.
    pub fn schema_script(self, tables: &[&TableSpec]) -> String {
        let mut statements = Vec::new();
        for table in tables {
            statements.push(self.create_table_sql(table));
            statements.extend(self.create_index_sql(table));
        }
        statements
            .iter()
            .map(|statement| format!("{statement};"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiring_model::{DIM_CANDIDATE, DIM_TECHNOLOGY, FACT_SELECTION};

    #[test]
    fn insert_lists_every_column() {
        assert_eq!(
            Dialect::Sqlite.insert_sql(&DIM_TECHNOLOGY),
            "INSERT INTO dim_technology (technology_id, technology) VALUES (?, ?)"
        );
    }

    #[test]
    fn mysql_uses_bounded_text_and_innodb() {
        let sql = Dialect::MySql.create_table_sql(&DIM_TECHNOLOGY);
        assert!(sql.contains(
            "technology VARCHAR(768) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL UNIQUE"
        ));
        assert!(sql.ends_with("ENGINE=InnoDB"));
    }

    #[test]
    fn mysql_natural_keys_compare_exact_bytes() {
        let sql = Dialect::MySql.create_table_sql(&DIM_CANDIDATE);
        assert!(sql.contains("email VARCHAR(768) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin"));
        assert!(sql.contains("first_name TEXT,"));
        assert!(!sql.contains("_ci"));
    }

    #[test]
    fn scores_are_stored_without_range_checks() {
        for dialect in [Dialect::Sqlite, Dialect::MySql] {
            let sql = dialect.create_table_sql(&FACT_SELECTION);
            assert!(!sql.contains("BETWEEN"));
        }
        let sql = Dialect::Sqlite.create_table_sql(&FACT_SELECTION);
        assert!(sql.contains("code_challenge_score REAL,"));
        assert!(sql.contains("interview_score REAL,"));
    }

    #[test]
    fn fact_table_declares_foreign_keys() {
        let sql = Dialect::MySql.create_table_sql(&FACT_SELECTION);
        assert!(sql.contains("FOREIGN KEY (date_id) REFERENCES dim_date (date_id)"));
        assert!(sql.contains("hired TINYINT(1) NOT NULL CHECK (hired IN (0, 1))"));
        assert!(sql.contains("candidate_id INT,"));
    }
}
