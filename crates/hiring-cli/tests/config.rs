//! Settings precedence: command line over file over defaults.

use std::path::PathBuf;

use hiring_cli::config::{DEFAULT_CHART_DIR, DEFAULT_INPUT, FileConfig, Overrides, Settings};
use hiring_store::{BackendKind, DEFAULT_SQLITE_PATH, StoreConfig};

const FILE: &str = r#"
input = "in/applications.csv"
separator = ","

[store]
backend = "mysql"
sqlite_path = "warehouse/file.db"

[store.mysql]
host = "db.internal"
user = "etl"
database = "hiring"

[report]
chart_dir = "out/charts"
"#;

#[test]
fn defaults_apply_without_file_or_flags() {
    let settings = Settings::resolve(&FileConfig::default(), &Overrides::default()).unwrap();

    assert_eq!(settings.input, PathBuf::from(DEFAULT_INPUT));
    assert_eq!(settings.separator, b';');
    assert_eq!(
        settings.store,
        StoreConfig::Sqlite {
            path: PathBuf::from(DEFAULT_SQLITE_PATH)
        }
    );
    assert_eq!(settings.chart_dir, Some(PathBuf::from(DEFAULT_CHART_DIR)));
}

#[test]
fn file_values_replace_defaults() {
    let file = FileConfig::parse(FILE).unwrap();
    let settings = Settings::resolve(&file, &Overrides::default()).unwrap();

    assert_eq!(settings.input, PathBuf::from("in/applications.csv"));
    assert_eq!(settings.separator, b',');
    let StoreConfig::MySql(mysql) = &settings.store else {
        panic!("expected MySQL, got {:?}", settings.store);
    };
    assert_eq!(mysql.host, "db.internal");
    assert_eq!(mysql.user, "etl");
    assert_eq!(mysql.port, 3306);
    assert_eq!(mysql.database, "hiring");
    assert_eq!(settings.chart_dir, Some(PathBuf::from("out/charts")));
}

#[test]
fn flags_replace_file_values() {
    let file = FileConfig::parse(FILE).unwrap();
    let overrides = Overrides {
        input: Some(PathBuf::from("cli.csv")),
        backend: Some(BackendKind::Sqlite),
        sqlite_path: Some(PathBuf::from("cli.db")),
        no_charts: true,
        ..Overrides::default()
    };
    let settings = Settings::resolve(&file, &overrides).unwrap();

    assert_eq!(settings.input, PathBuf::from("cli.csv"));
    assert_eq!(
        settings.store,
        StoreConfig::Sqlite {
            path: PathBuf::from("cli.db")
        }
    );
    assert_eq!(settings.chart_dir, None);
}

#[test]
fn mysql_flags_override_single_fields() {
    let file = FileConfig::parse(FILE).unwrap();
    let overrides = Overrides {
        mysql_port: Some(3307),
        mysql_password: Some("secret".to_string()),
        ..Overrides::default()
    };
    let settings = Settings::resolve(&file, &overrides).unwrap();

    let StoreConfig::MySql(mysql) = settings.store else {
        panic!("expected MySQL");
    };
    assert_eq!(mysql.host, "db.internal");
    assert_eq!(mysql.port, 3307);
    assert_eq!(mysql.password, "secret");
}

#[test]
fn invalid_database_name_is_rejected() {
    let overrides = Overrides {
        backend: Some(BackendKind::Mysql),
        mysql_database: Some("bad name".to_string()),
        ..Overrides::default()
    };
    assert!(Settings::resolve(&FileConfig::default(), &overrides).is_err());
}

#[test]
fn config_file_is_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hiring-etl.toml");
    std::fs::write(&path, "[report]\ncharts = false\n").unwrap();

    let file = FileConfig::discover(Some(&path)).unwrap();
    let settings = Settings::resolve(&file, &Overrides::default()).unwrap();
    assert_eq!(settings.chart_dir, None);

    let missing = dir.path().join("missing.toml");
    let err = FileConfig::discover(Some(&missing)).unwrap_err();
    assert!(format!("{err:#}").contains("missing.toml"));
}
