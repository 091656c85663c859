//! Static description of the warehouse tables.
//!
//! Storage backends render DDL from these descriptions, and the transform
//! crate emits rows in the same column order, so this module is the single
//! source of truth for the output schema.

use crate::error::{ModelError, Result};

/// Logical column type; each backend maps it to a concrete SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Surrogate key (primary or foreign).
    Key,
    Integer,
    /// Score, nominally on the 0-10 scale; stored as read.
    Score,
    Text,
    Date,
    /// Boolean stored as 0/1.
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
}

impl ColumnSpec {
    const fn required(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            unique: false,
        }
    }

    const fn optional(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: true,
            unique: false,
        }
    }

    const fn natural_key(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            unique: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub table: &'static str,
    pub references: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnSpec],
    pub foreign_keys: &'static [ForeignKey],
    pub indexes: &'static [IndexSpec],
}

impl TableSpec {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_fact(&self) -> bool {
        !self.foreign_keys.is_empty()
    }
}

pub const DIM_TECHNOLOGY: TableSpec = TableSpec {
    name: "dim_technology",
    primary_key: "technology_id",
    columns: &[
        ColumnSpec::required("technology_id", ColumnType::Key),
        ColumnSpec::natural_key("technology", ColumnType::Text),
    ],
    foreign_keys: &[],
    indexes: &[],
};

pub const DIM_SENIORITY: TableSpec = TableSpec {
    name: "dim_seniority",
    primary_key: "seniority_id",
    columns: &[
        ColumnSpec::required("seniority_id", ColumnType::Key),
        ColumnSpec::natural_key("seniority", ColumnType::Text),
    ],
    foreign_keys: &[],
    indexes: &[],
};

pub const DIM_COUNTRY: TableSpec = TableSpec {
    name: "dim_country",
    primary_key: "country_id",
    columns: &[
        ColumnSpec::required("country_id", ColumnType::Key),
        ColumnSpec::natural_key("country", ColumnType::Text),
    ],
    foreign_keys: &[],
    indexes: &[],
};

pub const DIM_DATE: TableSpec = TableSpec {
    name: "dim_date",
    primary_key: "date_id",
    columns: &[
        ColumnSpec::required("date_id", ColumnType::Key),
        ColumnSpec::natural_key("full_date", ColumnType::Date),
        ColumnSpec::required("year", ColumnType::Integer),
        ColumnSpec::required("month", ColumnType::Integer),
        ColumnSpec::required("quarter", ColumnType::Integer),
        ColumnSpec::required("day", ColumnType::Integer),
        ColumnSpec::required("weekday", ColumnType::Integer),
    ],
    foreign_keys: &[],
    indexes: &[IndexSpec {
        name: "idx_date_full_date",
        column: "full_date",
    }],
};

pub const DIM_CANDIDATE: TableSpec = TableSpec {
    name: "dim_candidate",
    primary_key: "candidate_id",
    columns: &[
        ColumnSpec::required("candidate_id", ColumnType::Key),
        ColumnSpec::optional("first_name", ColumnType::Text),
        ColumnSpec::optional("last_name", ColumnType::Text),
        ColumnSpec::natural_key("email", ColumnType::Text),
        ColumnSpec::optional("yoe", ColumnType::Integer),
    ],
    foreign_keys: &[],
    indexes: &[],
};

pub const FACT_SELECTION: TableSpec = TableSpec {
    name: "fact_selection",
    primary_key: "selection_id",
    columns: &[
        ColumnSpec::required("selection_id", ColumnType::Key),
        ColumnSpec::optional("candidate_id", ColumnType::Key),
        ColumnSpec::required("country_id", ColumnType::Key),
        ColumnSpec::required("technology_id", ColumnType::Key),
        ColumnSpec::required("seniority_id", ColumnType::Key),
        ColumnSpec::required("date_id", ColumnType::Key),
        ColumnSpec::optional("code_challenge_score", ColumnType::Score),
        ColumnSpec::optional("interview_score", ColumnType::Score),
        ColumnSpec::required("hired", ColumnType::Flag),
    ],
    foreign_keys: &[
        ForeignKey {
            column: "candidate_id",
            table: "dim_candidate",
            references: "candidate_id",
        },
        ForeignKey {
            column: "country_id",
            table: "dim_country",
            references: "country_id",
        },
        ForeignKey {
            column: "technology_id",
            table: "dim_technology",
            references: "technology_id",
        },
        ForeignKey {
            column: "seniority_id",
            table: "dim_seniority",
            references: "seniority_id",
        },
        ForeignKey {
            column: "date_id",
            table: "dim_date",
            references: "date_id",
        },
    ],
    indexes: &[
        IndexSpec {
            name: "idx_fact_date",
            column: "date_id",
        },
        IndexSpec {
            name: "idx_fact_technology",
            column: "technology_id",
        },
        IndexSpec {
            name: "idx_fact_country",
            column: "country_id",
        },
        IndexSpec {
            name: "idx_fact_seniority",
            column: "seniority_id",
        },
        IndexSpec {
            name: "idx_fact_hired",
            column: "hired",
        },
    ],
};

/// Dimension tables in load order.
pub const DIMENSION_TABLES: [&TableSpec; 5] = [
    &DIM_TECHNOLOGY,
    &DIM_SENIORITY,
    &DIM_COUNTRY,
    &DIM_DATE,
    &DIM_CANDIDATE,
];

/// All warehouse tables; dimensions precede the fact table that references them.
pub const STAR_TABLES: [&TableSpec; 6] = [
    &DIM_TECHNOLOGY,
    &DIM_SENIORITY,
    &DIM_COUNTRY,
    &DIM_DATE,
    &DIM_CANDIDATE,
    &FACT_SELECTION,
];

pub fn table_by_name(name: &str) -> Result<&'static TableSpec> {
    STAR_TABLES
        .iter()
        .copied()
        .find(|table| table.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ModelError::UnknownTable(name.to_string()))
}
