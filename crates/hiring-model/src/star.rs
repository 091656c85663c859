//! Dimension and fact rows of the hiring star schema.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::SurrogateKey;

/// Minimum score on both evaluations for a candidate to count as hired.
pub const HIRE_THRESHOLD: f64 = 7.0;

/// Returns true when both scores are present and reach [`HIRE_THRESHOLD`].
pub fn is_hired(code_challenge_score: Option<f64>, interview_score: Option<f64>) -> bool {
    match (code_challenge_score, interview_score) {
        (Some(code), Some(interview)) => code >= HIRE_THRESHOLD && interview >= HIRE_THRESHOLD,
        _ => false,
    }
}

/// A dimension row: surrogate key plus natural value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionEntry<T> {
    pub key: SurrogateKey,
    pub value: T,
}

/// Calendar attributes stored alongside each date in `dim_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAttributes {
    pub full_date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    pub day: u32,
    /// ISO weekday, 1 = Monday through 7 = Sunday.
    pub weekday: u32,
}

impl DateAttributes {
    pub fn from_date(full_date: NaiveDate) -> Self {
        let month = full_date.month();
        Self {
            full_date,
            year: full_date.year(),
            month,
            quarter: (month - 1) / 3 + 1,
            day: full_date.day(),
            weekday: full_date.weekday().number_from_monday(),
        }
    }
}

/// Descriptive attributes of a candidate, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub yoe: Option<i64>,
}

/// One row of `fact_selection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSelection {
    pub selection_id: SurrogateKey,
    /// `None` when the source row carried no email.
    pub candidate_id: Option<SurrogateKey>,
    pub country_id: SurrogateKey,
    pub technology_id: SurrogateKey,
    pub seniority_id: SurrogateKey,
    pub date_id: SurrogateKey,
    pub code_challenge_score: Option<f64>,
    pub interview_score: Option<f64>,
    pub hired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hired_requires_both_scores() {
        assert!(is_hired(Some(7.0), Some(7.0)));
        assert!(is_hired(Some(10.0), Some(7.5)));
        assert!(!is_hired(Some(6.9), Some(10.0)));
        assert!(!is_hired(Some(10.0), Some(6.99)));
    }

    #[test]
    fn missing_score_is_never_hired() {
        assert!(!is_hired(None, Some(9.0)));
        assert!(!is_hired(Some(9.0), None));
        assert!(!is_hired(None, None));
    }

    #[test]
    fn date_attributes_derive_calendar_parts() {
        let date = NaiveDate::from_ymd_opt(2021, 11, 14).unwrap();
        let attrs = DateAttributes::from_date(date);
        assert_eq!(attrs.year, 2021);
        assert_eq!(attrs.month, 11);
        assert_eq!(attrs.quarter, 4);
        assert_eq!(attrs.day, 14);
        // 2021-11-14 was a Sunday
        assert_eq!(attrs.weekday, 7);
    }
}
