//! Dimension building: deduplicated natural values with dense surrogate keys.
//!
//! Keys are assigned in order of first appearance while iterating the source
//! records, starting at 1. Null values never enter a dimension.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDate;

use hiring_model::{
    ApplicationRecord, CandidateProfile, DateAttributes, DimensionEntry, SourceColumn,
    SurrogateKey,
};

use crate::date::parse_application_date;

/// A lookup table from natural value to surrogate key.
#[derive(Debug, Clone)]
pub struct Dimension<K> {
    values: Vec<K>,
    index: HashMap<K, SurrogateKey>,
}

pub type TextDimension = Dimension<String>;
pub type DateDimension = Dimension<NaiveDate>;

impl<K> Default for Dimension<K> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Dimension<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the key of `value`, assigning the next dense key if it is new.
    pub fn insert(&mut self, value: K) -> SurrogateKey {
        if let Some(key) = self.index.get(&value) {
            return *key;
        }
        let key = SurrogateKey::from_index(self.values.len());
        self.values.push(value.clone());
        self.index.insert(value, key);
        key
    }

    /// Builds a dimension from values in iteration order; `None` is skipped.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<K>>,
    {
        let mut dimension = Self::new();
        for value in values.into_iter().flatten() {
            dimension.insert(value);
        }
        dimension
    }

    /// Builds a dimension by applying `extract` to every record.
    pub fn build<F>(records: &[ApplicationRecord], extract: F) -> Self
    where
        F: Fn(&ApplicationRecord) -> Option<K>,
    {
        Self::from_values(records.iter().map(extract))
    }

    pub fn lookup<Q>(&self, value: &Q) -> Option<SurrogateKey>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(value).copied()
    }

    pub fn get(&self, key: SurrogateKey) -> Option<&K> {
        self.values.get(key.get() as usize - 1)
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = DimensionEntry<&K>> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| DimensionEntry {
                key: SurrogateKey::from_index(idx),
                value,
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Trimmed natural value of a text attribute; blank text counts as null.
pub fn natural_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Builds a text dimension (technology, seniority, country) from one column.
pub fn build_text_dimension(records: &[ApplicationRecord], column: SourceColumn) -> TextDimension {
    Dimension::build(records, |record| {
        natural_text(record.text(column)).map(str::to_string)
    })
}

/// Parsed application date of a record.
pub fn record_date(record: &ApplicationRecord) -> Option<NaiveDate> {
    record
        .application_date
        .as_deref()
        .and_then(parse_application_date)
}

/// Builds the date dimension. Dates are parsed before deduplication.
pub fn build_date_dimension(records: &[ApplicationRecord]) -> DateDimension {
    let dimension = Dimension::build(records, record_date);
    let unparsed = records
        .iter()
        .filter(|record| {
            natural_text(record.application_date.as_deref()).is_some()
                && record_date(record).is_none()
        })
        .count();
    if unparsed > 0 {
        tracing::warn!(
            rows = unparsed,
            "application dates that could not be parsed were treated as missing"
        );
    }
    dimension
}

impl DateDimension {
    /// Date entries with derived calendar attributes.
    pub fn attributes(&self) -> impl Iterator<Item = DimensionEntry<DateAttributes>> + '_ {
        self.entries().map(|entry| DimensionEntry {
            key: entry.key,
            value: DateAttributes::from_date(*entry.value),
        })
    }
}

/// Builds the candidate dimension, keyed by email.
pub fn build_candidate_dimension(records: &[ApplicationRecord]) -> CandidateDimension {
    CandidateDimension::build(records)
}

/// Candidates keyed by email; the first row carrying an email supplies the profile.
#[derive(Debug, Clone, Default)]
pub struct CandidateDimension {
    keys: TextDimension,
    profiles: Vec<CandidateProfile>,
}

impl CandidateDimension {
    pub fn build(records: &[ApplicationRecord]) -> Self {
        let mut dimension = Self::default();
        for record in records {
            let Some(email) = natural_text(record.email.as_deref()) else {
                continue;
            };
            if dimension.keys.lookup(email).is_some() {
                continue;
            }
            dimension.keys.insert(email.to_string());
            dimension.profiles.push(CandidateProfile {
                email: email.to_string(),
                first_name: record.first_name.clone(),
                last_name: record.last_name.clone(),
                yoe: record.yoe,
            });
        }
        dimension
    }

    pub fn lookup(&self, email: &str) -> Option<SurrogateKey> {
        self.keys.lookup(email)
    }

    pub fn entries(&self) -> impl Iterator<Item = DimensionEntry<&CandidateProfile>> + '_ {
        self.profiles
            .iter()
            .enumerate()
            .map(|(idx, profile)| DimensionEntry {
                key: SurrogateKey::from_index(idx),
                value: profile,
            })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(technology: Option<&str>, date: Option<&str>) -> ApplicationRecord {
        ApplicationRecord {
            technology: technology.map(str::to_string),
            application_date: date.map(str::to_string),
            ..ApplicationRecord::default()
        }
    }

    #[test]
    fn keys_follow_first_appearance() {
        let records = vec![
            record(Some("Go"), None),
            record(Some("Rust"), None),
            record(Some("Go"), None),
            record(None, None),
            record(Some("  "), None),
            record(Some("Java"), None),
        ];
        let dimension = build_text_dimension(&records, SourceColumn::Technology);

        let entries: Vec<(u32, &str)> = dimension
            .entries()
            .map(|entry| (entry.key.get(), entry.value.as_str()))
            .collect();
        assert_eq!(entries, vec![(1, "Go"), (2, "Rust"), (3, "Java")]);
        assert_eq!(dimension.lookup("Rust").map(SurrogateKey::get), Some(2));
        assert_eq!(dimension.lookup("Python"), None);
    }

    #[test]
    fn equivalent_dates_collapse() {
        let records = vec![
            record(None, Some("2024-01-05")),
            record(None, Some("2024-1-5")),
            record(None, Some("not a date")),
            record(None, Some("2023-12-31")),
        ];
        let dimension = build_date_dimension(&records);

        assert_eq!(dimension.len(), 2);
        let jan5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(dimension.lookup(&jan5).map(SurrogateKey::get), Some(1));
        let attrs: Vec<DateAttributes> = dimension.attributes().map(|e| e.value).collect();
        assert_eq!(attrs[1].year, 2023);
        assert_eq!(attrs[1].month, 12);
    }

    #[test]
    fn candidate_profile_comes_from_first_row() {
        let records = vec![
            ApplicationRecord {
                first_name: Some("Ana".to_string()),
                email: Some("ana@example.com".to_string()),
                yoe: Some(3),
                ..ApplicationRecord::default()
            },
            ApplicationRecord {
                first_name: Some("Anna".to_string()),
                email: Some("ana@example.com".to_string()),
                yoe: Some(4),
                ..ApplicationRecord::default()
            },
            ApplicationRecord::default(),
        ];
        let candidates = CandidateDimension::build(&records);

        assert_eq!(candidates.len(), 1);
        let entry = candidates.entries().next().unwrap();
        assert_eq!(entry.key.get(), 1);
        assert_eq!(entry.value.first_name.as_deref(), Some("Ana"));
        assert_eq!(entry.value.yoe, Some(3));
    }
}
