//! Conversion of the raw DataFrame into typed application records.

use std::collections::BTreeMap;
use std::path::Path;

use polars::prelude::{AnyValue, Column, DataFrame};

use hiring_model::{ApplicationRecord, SourceColumn};

use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_f64, any_to_i64, any_to_string_non_empty};
use crate::reader::{IngestOptions, read_candidates_frame};

/// Collapses runs of whitespace and strips a UTF-8 BOM so that headers such
/// as `"Code  Challenge Score "` still match.
fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// DataFrame columns resolved for each source column.
struct SourceColumns<'a> {
    columns: BTreeMap<SourceColumn, &'a Column>,
}

impl<'a> SourceColumns<'a> {
    fn resolve(df: &'a DataFrame, path: &Path) -> Result<Self> {
        let mut columns = BTreeMap::new();
        for source in SourceColumn::ALL {
            let wanted = normalize_header(source.header());
            let column = df
                .get_columns()
                .iter()
                .find(|column| normalize_header(column.name().as_str()) == wanted)
                .ok_or_else(|| IngestError::MissingColumn {
                    column: source.header().to_string(),
                    path: path.to_path_buf(),
                })?;
            columns.insert(source, column);
        }
        Ok(Self { columns })
    }

    fn value(&self, source: SourceColumn, row: usize) -> Result<AnyValue<'a>> {
        Ok(self.columns[&source].get(row)?)
    }

    fn text(&self, source: SourceColumn, row: usize) -> Result<Option<String>> {
        Ok(any_to_string_non_empty(self.value(source, row)?))
    }

    /// Parsed score plus whether a non-empty raw value failed to parse.
    fn score(&self, source: SourceColumn, row: usize) -> Result<(Option<f64>, bool)> {
        let raw = self.value(source, row)?;
        let present = any_to_string_non_empty(raw.clone()).is_some();
        let parsed = any_to_f64(raw);
        Ok((parsed, present && parsed.is_none()))
    }
}

/// Converts a candidates DataFrame into application records, in row order.
pub fn records_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<ApplicationRecord>> {
    let columns = SourceColumns::resolve(df, path)?;

    let mut records = Vec::with_capacity(df.height());
    let mut unparsed_scores = 0usize;
    for row in 0..df.height() {
        let (code_challenge_score, code_unparsed) =
            columns.score(SourceColumn::CodeChallengeScore, row)?;
        let (technical_interview_score, interview_unparsed) =
            columns.score(SourceColumn::TechnicalInterviewScore, row)?;
        if code_unparsed || interview_unparsed {
            unparsed_scores += 1;
        }
        records.push(ApplicationRecord {
            first_name: columns.text(SourceColumn::FirstName, row)?,
            last_name: columns.text(SourceColumn::LastName, row)?,
            email: columns.text(SourceColumn::Email, row)?,
            application_date: columns.text(SourceColumn::ApplicationDate, row)?,
            country: columns.text(SourceColumn::Country, row)?,
            yoe: any_to_i64(columns.value(SourceColumn::Yoe, row)?),
            seniority: columns.text(SourceColumn::Seniority, row)?,
            technology: columns.text(SourceColumn::Technology, row)?,
            code_challenge_score,
            technical_interview_score,
        });
    }

    if unparsed_scores > 0 {
        tracing::warn!(
            path = %path.display(),
            rows = unparsed_scores,
            "scores that could not be parsed were treated as missing"
        );
    }
    Ok(records)
}

/// Reads the candidates file into application records.
pub fn read_application_records(
    path: &Path,
    options: IngestOptions,
) -> Result<Vec<ApplicationRecord>> {
    let df = read_candidates_frame(path, options)?;
    let records = records_from_frame(&df, path)?;
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "loaded application records"
    );
    Ok(records)
}
