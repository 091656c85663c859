//! Backend-neutral cell values and row sets.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{ModelError, Result};
use crate::schema::TableSpec;
use crate::SurrogateKey;

/// A single SQL value, independent of the storage backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Real(v) if v.fract() == 0.0 => Some(*v as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Null => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => f.write_str(&format_numeric(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl From<SurrogateKey> for Cell {
    fn from(value: SurrogateKey) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Rows destined for one warehouse table, in the table's column order.
#[derive(Debug, Clone)]
pub struct TableRows {
    pub spec: &'static TableSpec,
    pub rows: Vec<Vec<Cell>>,
}

impl TableRows {
    pub fn new(spec: &'static TableSpec) -> Self {
        Self {
            spec,
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(spec: &'static TableSpec, capacity: usize) -> Self {
        Self {
            spec,
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.spec.width() {
            return Err(ModelError::RowWidth {
                table: self.spec.name,
                expected: self.spec.width(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column names and rows returned by a read query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl QueryResult {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
    }

    /// Values of the named column, one per row.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DIM_COUNTRY;

    #[test]
    fn format_numeric_strips_trailing_zeros() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(7.50), "7.5");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(120.0), "120");
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut rows = TableRows::new(&DIM_COUNTRY);
        assert!(rows.push_row(vec![Cell::from(1_i64)]).is_err());
        rows.push_row(vec![Cell::from(1_i64), Cell::from("Brazil")])
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn optional_values_become_null() {
        assert_eq!(Cell::from(None::<String>), Cell::Null);
        assert_eq!(Cell::from(Some(3_i64)), Cell::Integer(3));
        assert_eq!(Cell::from(true), Cell::Integer(1));
    }

    #[test]
    fn text_cells_parse_as_numbers() {
        assert_eq!(Cell::from("12").as_i64(), Some(12));
        assert_eq!(Cell::from("7.25").as_f64(), Some(7.25));
        assert_eq!(Cell::Null.as_f64(), None);
    }
}
