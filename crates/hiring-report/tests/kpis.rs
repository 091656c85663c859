//! KPI aggregates over a small loaded warehouse.

use hiring_model::{ApplicationRecord, Cell};
use hiring_report::{
    AVERAGE_SCORES_BY_SENIORITY, HIRE_RATE_BY_TECHNOLOGY, HIRES_BY_COUNTRY_YEAR,
    HIRES_BY_SENIORITY, HIRES_BY_TECHNOLOGY, HIRES_BY_YEAR, KPIS, ReportOptions, run_kpi,
    run_report,
};
use hiring_store::{SqliteBackend, load_star_schema};
use hiring_transform::StarSchema;

fn application(
    email: &str,
    technology: &str,
    seniority: &str,
    country: &str,
    date: &str,
    code: f64,
    interview: f64,
) -> ApplicationRecord {
    ApplicationRecord {
        first_name: Some("Ana".to_string()),
        last_name: Some("Diaz".to_string()),
        email: Some(email.to_string()),
        application_date: Some(date.to_string()),
        country: Some(country.to_string()),
        yoe: Some(3),
        seniority: Some(seniority.to_string()),
        technology: Some(technology.to_string()),
        code_challenge_score: Some(code),
        technical_interview_score: Some(interview),
    }
}

fn loaded_backend() -> SqliteBackend {
    let star = StarSchema::build(&[
        application("a@x.io", "Rust", "Senior", "Brazil", "2021-03-04", 8.0, 9.0),
        application("b@x.io", "Rust", "Junior", "Colombia", "2021-06-01", 5.0, 9.0),
        application("c@x.io", "Go", "Senior", "Brazil", "2022-01-10", 7.0, 7.0),
        application("d@x.io", "Go", "Junior", "Norway", "2022-02-02", 9.0, 10.0),
        application("e@x.io", "Java", "Lead", "Ecuador", "2020-12-31", 3.0, 4.0),
        application("f@x.io", "Rust", "Senior", "Ecuador", "2022-05-05", 10.0, 10.0),
    ]);
    let mut backend = SqliteBackend::open_in_memory().unwrap();
    load_star_schema(&mut backend, &star.to_tables().unwrap()).unwrap();
    backend
}

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value present");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn hires_by_technology_counts_only_hired_rows() {
    let mut backend = loaded_backend();
    let result = run_kpi(&mut backend, &HIRES_BY_TECHNOLOGY).unwrap();

    assert_eq!(result.result.len(), 2);
    approx(result.value_for("Rust", "hires").and_then(Cell::as_f64), 2.0);
    approx(result.value_for("Go", "hires").and_then(Cell::as_f64), 2.0);
    assert!(result.value_for("Java", "hires").is_none());
}

#[test]
fn hires_by_year_is_in_ascending_year_order() {
    let mut backend = loaded_backend();
    let result = run_kpi(&mut backend, &HIRES_BY_YEAR).unwrap();

    assert_eq!(result.categories().unwrap(), vec!["2021", "2022"]);
    assert_eq!(result.values("hires").unwrap(), vec![1.0, 3.0]);
}

#[test]
fn hires_by_seniority_is_descending() {
    let mut backend = loaded_backend();
    let result = run_kpi(&mut backend, &HIRES_BY_SENIORITY).unwrap();

    assert_eq!(result.categories().unwrap(), vec!["Senior", "Junior"]);
    assert_eq!(result.values("hires").unwrap(), vec![3.0, 1.0]);
}

#[test]
fn country_year_only_tracks_listed_countries() {
    let mut backend = loaded_backend();
    let result = run_kpi(&mut backend, &HIRES_BY_COUNTRY_YEAR).unwrap();

    let series = result.series().unwrap();
    let names: Vec<&str> = series.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Brazil", "Ecuador"]);
    assert_eq!(series[0].1, vec![(2021.0, 1.0), (2022.0, 1.0)]);
    assert_eq!(series[1].1, vec![(2022.0, 1.0)]);
}

#[test]
fn hire_rate_is_a_rounded_percentage() {
    let mut backend = loaded_backend();
    let result = run_kpi(&mut backend, &HIRE_RATE_BY_TECHNOLOGY).unwrap();

    assert_eq!(result.categories().unwrap(), vec!["Go", "Rust", "Java"]);
    assert_eq!(result.values("hire_rate").unwrap(), vec![100.0, 66.67, 0.0]);
    approx(
        result.value_for("Rust", "total_candidates").and_then(Cell::as_f64),
        3.0,
    );
    approx(result.value_for("Java", "hires").and_then(Cell::as_f64), 0.0);
}

#[test]
fn average_scores_are_rounded_per_seniority() {
    let mut backend = loaded_backend();
    let result = run_kpi(&mut backend, &AVERAGE_SCORES_BY_SENIORITY).unwrap();

    assert_eq!(result.categories().unwrap(), vec!["Senior", "Junior", "Lead"]);
    assert_eq!(
        result.values("avg_code_score").unwrap(),
        vec![8.33, 7.0, 3.0]
    );
    assert_eq!(
        result.values("avg_interview_score").unwrap(),
        vec![8.67, 9.5, 4.0]
    );
}

#[test]
fn report_writes_one_chart_per_kpi() {
    let mut backend = loaded_backend();
    let dir = tempfile::tempdir().unwrap();
    let options = ReportOptions {
        chart_dir: Some(dir.path().join("charts")),
    };

    let outcome = run_report(&mut backend, &options);

    assert!(outcome.is_success(), "failures: {:?}", outcome.failures);
    assert_eq!(outcome.results.len(), KPIS.len());
    assert_eq!(outcome.charts.len(), KPIS.len());
    for path in &outcome.charts {
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"), "{} is not SVG", path.display());
    }
    let technology = dir.path().join("charts").join("hires_by_technology.svg");
    assert!(std::fs::read_to_string(technology)
        .unwrap()
        .contains("Hires by Technology"));
}

#[test]
fn report_without_charts_writes_nothing() {
    let mut backend = loaded_backend();
    let outcome = run_report(&mut backend, &ReportOptions::default());

    assert!(outcome.is_success());
    assert!(outcome.charts.is_empty());
    assert!(outcome.result("hires_by_year").is_some());
}

#[test]
fn missing_tables_fail_each_kpi_without_aborting() {
    let mut backend = SqliteBackend::open_in_memory().unwrap();
    let outcome = run_report(&mut backend, &ReportOptions::default());

    assert!(!outcome.is_success());
    assert_eq!(outcome.failures.len(), KPIS.len());
    assert!(outcome.results.is_empty());
}
