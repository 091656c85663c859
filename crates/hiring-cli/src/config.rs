//! Run settings: defaults, an optional TOML file, and command-line overrides.
//!
//! Precedence is command line, then file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use hiring_store::{BackendKind, DEFAULT_SQLITE_PATH, MySqlConfig, StoreConfig};
use serde::Deserialize;

pub const DEFAULT_INPUT: &str = "data/candidates.csv";
pub const DEFAULT_CHART_DIR: &str = "charts";
/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "hiring-etl.toml";

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub separator: Option<char>,
    pub store: StoreSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: Option<BackendKind>,
    pub sqlite_path: Option<PathBuf>,
    pub mysql: MySqlConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub chart_dir: Option<PathBuf>,
    pub charts: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load the explicit file, or the default file when it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!(path = DEFAULT_CONFIG_FILE, "using default config file");
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub separator: Option<char>,
    pub backend: Option<BackendKind>,
    pub sqlite_path: Option<PathBuf>,
    pub mysql_host: Option<String>,
    pub mysql_port: Option<u16>,
    pub mysql_user: Option<String>,
    pub mysql_password: Option<String>,
    pub mysql_database: Option<String>,
    pub chart_dir: Option<PathBuf>,
    pub no_charts: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub separator: u8,
    pub store: StoreConfig,
    /// `None` when charts are disabled.
    pub chart_dir: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(file: &FileConfig, overrides: &Overrides) -> Result<Self> {
        let input = overrides
            .input
            .clone()
            .or_else(|| file.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let separator = separator_byte(overrides.separator.or(file.separator).unwrap_or(';'))?;

        let backend = overrides
            .backend
            .or(file.store.backend)
            .unwrap_or_default();
        let store = match backend {
            BackendKind::Sqlite => StoreConfig::Sqlite {
                path: overrides
                    .sqlite_path
                    .clone()
                    .or_else(|| file.store.sqlite_path.clone())
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH)),
            },
            BackendKind::Mysql => {
                let mut mysql = file.store.mysql.clone();
                if let Some(host) = &overrides.mysql_host {
                    mysql.host.clone_from(host);
                }
                if let Some(port) = overrides.mysql_port {
                    mysql.port = port;
                }
                if let Some(user) = &overrides.mysql_user {
                    mysql.user.clone_from(user);
                }
                if let Some(password) = &overrides.mysql_password {
                    mysql.password.clone_from(password);
                }
                if let Some(database) = &overrides.mysql_database {
                    mysql.database.clone_from(database);
                }
                mysql.validate()?;
                StoreConfig::MySql(mysql)
            }
        };

        let charts = !overrides.no_charts && file.report.charts.unwrap_or(true);
        let chart_dir = charts.then(|| {
            overrides
                .chart_dir
                .clone()
                .or_else(|| file.report.chart_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_DIR))
        });

        Ok(Self {
            input,
            separator,
            store,
            chart_dir,
        })
    }
}

fn separator_byte(separator: char) -> Result<u8> {
    if !separator.is_ascii() || separator == '"' || separator.is_ascii_alphanumeric() {
        bail!("unsupported field separator {separator:?}; use a single ASCII punctuation or tab character");
    }
    Ok(separator as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_must_be_ascii_punctuation() {
        assert_eq!(separator_byte(';').unwrap(), b';');
        assert_eq!(separator_byte('\t').unwrap(), b'\t');
        assert!(separator_byte('a').is_err());
        assert!(separator_byte('é').is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("inputs = \"x.csv\"").is_err());
    }
}
