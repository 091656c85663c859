//! Integration tests for candidate file ingestion.

use std::io::Write;

use hiring_ingest::{IngestError, IngestOptions, read_application_records};
use tempfile::NamedTempFile;

const HEADER: &str = "First Name;Last Name;Email;Application Date;Country;YOE;Seniority;Technology;Code Challenge Score;Technical Interview Score";

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_semicolon_file_into_records() {
    let file = create_temp_csv(&format!(
        "{HEADER}\n\
         Bernadette;Langworth;leonard91@yahoo.com;2021-02-26;Norway;2;Intern;Data Engineer;3;3\n\
         Camryn;Reynolds;zelda56@hotmail.com;2021-09-09;Panama;10;Intern;Data Engineer;10;9\n"
    ));

    let records = read_application_records(file.path(), IngestOptions::default()).unwrap();

    assert_eq!(records.len(), 2);
    let second = &records[1];
    assert_eq!(second.first_name.as_deref(), Some("Camryn"));
    assert_eq!(second.email.as_deref(), Some("zelda56@hotmail.com"));
    assert_eq!(second.application_date.as_deref(), Some("2021-09-09"));
    assert_eq!(second.country.as_deref(), Some("Panama"));
    assert_eq!(second.yoe, Some(10));
    assert_eq!(second.technology.as_deref(), Some("Data Engineer"));
    assert_eq!(second.code_challenge_score, Some(10.0));
    assert_eq!(second.technical_interview_score, Some(9.0));
}

#[test]
fn empty_cells_become_none() {
    let file = create_temp_csv(&format!(
        "{HEADER}\nAna;Silva;ana@example.com;2022-01-05;;4;Mid-Level;Java;7;abc\n"
    ));

    let records = read_application_records(file.path(), IngestOptions::default()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].country, None);
    assert_eq!(records[0].seniority.as_deref(), Some("Mid-Level"));
    assert_eq!(records[0].code_challenge_score, Some(7.0));
    assert_eq!(records[0].technical_interview_score, None);
}

#[test]
fn columns_are_located_by_name() {
    let file = create_temp_csv(
        "technology;Email;Country;Seniority;Application Date;First Name;Last Name;yoe;Technical Interview Score;Code Challenge Score;Extra\n\
         Go;x@example.com;Chile;Senior;2020-03-01;X;Y;8;9;6;ignored\n",
    );

    let records = read_application_records(file.path(), IngestOptions::default()).unwrap();

    assert_eq!(records[0].technology.as_deref(), Some("Go"));
    assert_eq!(records[0].code_challenge_score, Some(6.0));
    assert_eq!(records[0].technical_interview_score, Some(9.0));
}

#[test]
fn missing_column_is_reported() {
    let file = create_temp_csv("First Name;Last Name;Email\nA;B;c@example.com\n");

    let result = read_application_records(file.path(), IngestOptions::default());

    match result {
        Err(IngestError::MissingColumn { column, .. }) => assert_eq!(column, "Application Date"),
        other => panic!("expected missing column error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_reported() {
    let result = read_application_records(
        std::path::Path::new("does/not/exist.csv"),
        IngestOptions::default(),
    );
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn custom_separator() {
    let file = create_temp_csv(&format!(
        "{}\nA,B,a@b.c,2020-01-01,Peru,1,Junior,Rust,8,8\n",
        HEADER.replace(';', ",")
    ));

    let records =
        read_application_records(file.path(), IngestOptions::default().with_separator(b','))
            .unwrap();

    assert_eq!(records[0].country.as_deref(), Some("Peru"));
}
