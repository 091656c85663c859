//! Tests for DataFrame conversion and CSV export.

use hiring_model::ApplicationRecord;
use hiring_transform::{StarSchema, table_frame, write_csv_exports};

fn record() -> ApplicationRecord {
    ApplicationRecord {
        first_name: Some("Bernadette".to_string()),
        last_name: Some("Langworth".to_string()),
        email: Some("leonard91@yahoo.com".to_string()),
        application_date: Some("2021-02-26".to_string()),
        country: Some("Norway".to_string()),
        yoe: Some(2),
        seniority: Some("Intern".to_string()),
        technology: Some("Data Engineer".to_string()),
        code_challenge_score: Some(3.0),
        technical_interview_score: Some(3.0),
    }
}

#[test]
fn fact_frame_has_schema_columns() {
    let star = StarSchema::build(&[record()]);
    let tables = star.to_tables().unwrap();
    let fact = tables.last().unwrap();

    let frame = table_frame(fact).unwrap();

    assert_eq!(frame.height(), 1);
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names[0], "selection_id");
    assert_eq!(names[8], "hired");
}

#[test]
fn exports_one_file_per_table() {
    let dir = tempfile::tempdir().unwrap();
    let star = StarSchema::build(&[record()]);

    let written = write_csv_exports(&star, dir.path()).unwrap();

    assert_eq!(written.len(), 6);
    let countries = std::fs::read_to_string(dir.path().join("dim_country.csv")).unwrap();
    let mut lines = countries.lines();
    assert_eq!(lines.next(), Some("country_id;country"));
    assert_eq!(lines.next(), Some("1;Norway"));
}
