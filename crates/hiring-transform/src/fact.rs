//! Fact assembly: inner join of the source records against the dimensions.

use std::collections::BTreeMap;
use std::fmt;

use hiring_model::privacy::redact_value;
use hiring_model::{ApplicationRecord, FactSelection, SurrogateKey, is_hired};

use crate::dimension::{
    CandidateDimension, DateDimension, TextDimension, natural_text, record_date,
};

/// Why a source record produced no fact row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DropReason {
    MissingTechnology,
    MissingSeniority,
    MissingCountry,
    MissingDate,
}

impl DropReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingTechnology => "missing technology",
            Self::MissingSeniority => "missing seniority",
            Self::MissingCountry => "missing country",
            Self::MissingDate => "missing or unparseable application date",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row counts of one fact assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped: BTreeMap<DropReason, usize>,
}

impl AssemblyStats {
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }

    pub fn dropped(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }
}

/// The dimensions a fact row is keyed by.
#[derive(Debug, Clone, Default)]
pub struct StarDimensions {
    pub technology: TextDimension,
    pub seniority: TextDimension,
    pub country: TextDimension,
    pub date: DateDimension,
    pub candidate: CandidateDimension,
}

/// Dimension keys resolved for one record.
struct Resolved {
    technology_id: SurrogateKey,
    seniority_id: SurrogateKey,
    country_id: SurrogateKey,
    date_id: SurrogateKey,
}

fn resolve(
    record: &ApplicationRecord,
    dimensions: &StarDimensions,
) -> Result<Resolved, DropReason> {
    let technology_id = natural_text(record.technology.as_deref())
        .and_then(|v| dimensions.technology.lookup(v))
        .ok_or(DropReason::MissingTechnology)?;
    let seniority_id = natural_text(record.seniority.as_deref())
        .and_then(|v| dimensions.seniority.lookup(v))
        .ok_or(DropReason::MissingSeniority)?;
    let country_id = natural_text(record.country.as_deref())
        .and_then(|v| dimensions.country.lookup(v))
        .ok_or(DropReason::MissingCountry)?;
    let date_id = record_date(record)
        .and_then(|d| dimensions.date.lookup(&d))
        .ok_or(DropReason::MissingDate)?;
    Ok(Resolved {
        technology_id,
        seniority_id,
        country_id,
        date_id,
    })
}

/// Joins every record against the dimensions and emits one fact row per
/// surviving record, in source order.
///
/// A record survives iff technology, seniority, country and application date
/// all resolve to a dimension key. Scores are carried through unchanged and a
/// missing score only makes the row not hired. The candidate key is looked up
/// by email but never drops a row.
pub fn assemble_facts(
    records: &[ApplicationRecord],
    dimensions: &StarDimensions,
) -> (Vec<FactSelection>, AssemblyStats) {
    let mut facts = Vec::with_capacity(records.len());
    let mut stats = AssemblyStats {
        rows_read: records.len(),
        ..AssemblyStats::default()
    };

    for (idx, record) in records.iter().enumerate() {
        let resolved = match resolve(record, dimensions) {
            Ok(resolved) => resolved,
            Err(reason) => {
                tracing::debug!(
                    row = idx + 1,
                    email = %redact_value(record.email.as_deref().unwrap_or_default()),
                    reason = %reason,
                    "record dropped by dimension join"
                );
                *stats.dropped.entry(reason).or_insert(0) += 1;
                continue;
            }
        };
        let candidate_id = natural_text(record.email.as_deref())
            .and_then(|email| dimensions.candidate.lookup(email));

        facts.push(FactSelection {
            selection_id: SurrogateKey::from_index(facts.len()),
            candidate_id,
            country_id: resolved.country_id,
            technology_id: resolved.technology_id,
            seniority_id: resolved.seniority_id,
            date_id: resolved.date_id,
            code_challenge_score: record.code_challenge_score,
            interview_score: record.technical_interview_score,
            hired: is_hired(
                record.code_challenge_score,
                record.technical_interview_score,
            ),
        });
    }

    stats.rows_kept = facts.len();
    (facts, stats)
}
