//! Flat source records as they arrive from the candidates file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Columns of the candidates file, in file order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SourceColumn {
    FirstName,
    LastName,
    Email,
    ApplicationDate,
    Country,
    Yoe,
    Seniority,
    Technology,
    CodeChallengeScore,
    TechnicalInterviewScore,
}

impl SourceColumn {
    pub const ALL: [SourceColumn; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::ApplicationDate,
        Self::Country,
        Self::Yoe,
        Self::Seniority,
        Self::Technology,
        Self::CodeChallengeScore,
        Self::TechnicalInterviewScore,
    ];

    /// Header text used by the source file.
    pub const fn header(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::ApplicationDate => "Application Date",
            Self::Country => "Country",
            Self::Yoe => "YOE",
            Self::Seniority => "Seniority",
            Self::Technology => "Technology",
            Self::CodeChallengeScore => "Code Challenge Score",
            Self::TechnicalInterviewScore => "Technical Interview Score",
        }
    }
}

impl fmt::Display for SourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One application as read from the source file.
///
/// Every field is optional: an empty or unparseable cell is `None`. The
/// application date is kept as raw text so that date parsing (and the
/// parse-then-dedupe rule of the date dimension) happens in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub application_date: Option<String>,
    pub country: Option<String>,
    pub yoe: Option<i64>,
    pub seniority: Option<String>,
    pub technology: Option<String>,
    pub code_challenge_score: Option<f64>,
    pub technical_interview_score: Option<f64>,
}

impl ApplicationRecord {
    /// Raw text value of a categorical column, if the column is categorical.
    pub fn text(&self, column: SourceColumn) -> Option<&str> {
        let value = match column {
            SourceColumn::FirstName => &self.first_name,
            SourceColumn::LastName => &self.last_name,
            SourceColumn::Email => &self.email,
            SourceColumn::ApplicationDate => &self.application_date,
            SourceColumn::Country => &self.country,
            SourceColumn::Seniority => &self.seniority,
            SourceColumn::Technology => &self.technology,
            SourceColumn::Yoe
            | SourceColumn::CodeChallengeScore
            | SourceColumn::TechnicalInterviewScore => return None,
        };
        value.as_deref()
    }
}
