//! The complete in-memory warehouse for one run.

use hiring_model::{
    ApplicationRecord, Cell, DIM_CANDIDATE, DIM_COUNTRY, DIM_DATE, DIM_SENIORITY,
    DIM_TECHNOLOGY, FACT_SELECTION, FactSelection, SourceColumn, TableRows, TableSpec,
};

use crate::dimension::{
    TextDimension, build_candidate_dimension, build_date_dimension, build_text_dimension,
};
use crate::error::Result;
use crate::fact::{AssemblyStats, StarDimensions, assemble_facts};

/// Dimensions, facts and join statistics derived from one source file.
#[derive(Debug, Clone, Default)]
pub struct StarSchema {
    pub dimensions: StarDimensions,
    pub facts: Vec<FactSelection>,
    pub stats: AssemblyStats,
}

impl StarSchema {
    /// Runs the dimension builders, then the fact assembler.
    pub fn build(records: &[ApplicationRecord]) -> Self {
        let dimensions = StarDimensions {
            technology: build_text_dimension(records, SourceColumn::Technology),
            seniority: build_text_dimension(records, SourceColumn::Seniority),
            country: build_text_dimension(records, SourceColumn::Country),
            date: build_date_dimension(records),
            candidate: build_candidate_dimension(records),
        };
        tracing::debug!(
            technologies = dimensions.technology.len(),
            seniorities = dimensions.seniority.len(),
            countries = dimensions.country.len(),
            dates = dimensions.date.len(),
            candidates = dimensions.candidate.len(),
            "dimensions built"
        );

        let (facts, stats) = assemble_facts(records, &dimensions);
        if stats.dropped_total() > 0 {
            for (reason, count) in &stats.dropped {
                tracing::info!(reason = %reason, rows = count, "records dropped by dimension join");
            }
        }
        tracing::info!(
            rows_read = stats.rows_read,
            facts = stats.rows_kept,
            dropped = stats.dropped_total(),
            "fact table assembled"
        );

        Self {
            dimensions,
            facts,
            stats,
        }
    }

    /// All six tables in load order (dimensions first, fact last).
    pub fn to_tables(&self) -> Result<Vec<TableRows>> {
        Ok(vec![
            text_table(&DIM_TECHNOLOGY, &self.dimensions.technology)?,
            text_table(&DIM_SENIORITY, &self.dimensions.seniority)?,
            text_table(&DIM_COUNTRY, &self.dimensions.country)?,
            self.date_table()?,
            self.candidate_table()?,
            self.fact_table()?,
        ])
    }

    fn date_table(&self) -> Result<TableRows> {
        let mut table = TableRows::with_capacity(&DIM_DATE, self.dimensions.date.len());
        for entry in self.dimensions.date.attributes() {
            let attrs = entry.value;
            table.push_row(vec![
                entry.key.into(),
                attrs.full_date.into(),
                attrs.year.into(),
                attrs.month.into(),
                attrs.quarter.into(),
                attrs.day.into(),
                attrs.weekday.into(),
            ])?;
        }
        Ok(table)
    }

    fn candidate_table(&self) -> Result<TableRows> {
        let mut table =
            TableRows::with_capacity(&DIM_CANDIDATE, self.dimensions.candidate.len());
        for entry in self.dimensions.candidate.entries() {
            let profile = entry.value;
            table.push_row(vec![
                entry.key.into(),
                profile.first_name.clone().into(),
                profile.last_name.clone().into(),
                profile.email.as_str().into(),
                profile.yoe.into(),
            ])?;
        }
        Ok(table)
    }

    fn fact_table(&self) -> Result<TableRows> {
        let mut table = TableRows::with_capacity(&FACT_SELECTION, self.facts.len());
        for fact in &self.facts {
            table.push_row(vec![
                fact.selection_id.into(),
                fact.candidate_id.into(),
                fact.country_id.into(),
                fact.technology_id.into(),
                fact.seniority_id.into(),
                fact.date_id.into(),
                fact.code_challenge_score.into(),
                fact.interview_score.into(),
                Cell::from(fact.hired),
            ])?;
        }
        Ok(table)
    }
}

fn text_table(spec: &'static TableSpec, dimension: &TextDimension) -> Result<TableRows> {
    let mut table = TableRows::with_capacity(spec, dimension.len());
    for entry in dimension.entries() {
        table.push_row(vec![entry.key.into(), entry.value.as_str().into()])?;
    }
    Ok(table)
}
