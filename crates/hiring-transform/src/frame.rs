//! DataFrame conversion and CSV export of warehouse tables.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{Column, CsvWriter, DataFrame, NamedFrom, SerWriter, Series};

use hiring_model::{ColumnType, TableRows};

use crate::error::{Result, TransformError};
use crate::star::StarSchema;

/// Builds a DataFrame with one typed column per table column.
pub fn table_frame(table: &TableRows) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.spec.width());
    for (idx, spec) in table.spec.columns.iter().enumerate() {
        let cells = table.rows.iter().map(|row| &row[idx]);
        let series = match spec.ty {
            ColumnType::Key | ColumnType::Integer | ColumnType::Flag => {
                let values: Vec<Option<i64>> = cells.map(|cell| cell.as_i64()).collect();
                Series::new(spec.name.into(), values)
            }
            ColumnType::Score => {
                let values: Vec<Option<f64>> = cells.map(|cell| cell.as_f64()).collect();
                Series::new(spec.name.into(), values)
            }
            ColumnType::Text | ColumnType::Date => {
                let values: Vec<Option<String>> = cells
                    .map(|cell| cell.as_str().map(str::to_string))
                    .collect();
                Series::new(spec.name.into(), values)
            }
        };
        columns.push(series.into());
    }
    let frame = DataFrame::new(columns)?;
    Ok(frame)
}

/// Writes every table to `<dir>/<table>.csv` (semicolon separated).
pub fn write_csv_exports(star: &StarSchema, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| TransformError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for table in star.to_tables()? {
        let mut frame = table_frame(&table)?;
        let path = dir.join(format!("{}.csv", table.name()));
        let mut file = File::create(&path).map_err(|source| TransformError::Write {
            path: path.clone(),
            source,
        })?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b';')
            .finish(&mut frame)?;
        tracing::debug!(path = %path.display(), rows = frame.height(), "table exported");
        written.push(path);
    }
    Ok(written)
}
