//! Connection settings for the warehouse backends.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, StoreError};

pub const DEFAULT_SQLITE_PATH: &str = "data/data_warehouse.db";
pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
pub const DEFAULT_MYSQL_USER: &str = "root";
pub const DEFAULT_MYSQL_DATABASE: &str = "data_warehouse";

/// Which backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sqlite,
    Mysql,
}

impl BackendKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Mysql => "mysql",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MYSQL_HOST.to_string(),
            port: DEFAULT_MYSQL_PORT,
            user: DEFAULT_MYSQL_USER.to_string(),
            password: String::new(),
            database: DEFAULT_MYSQL_DATABASE.to_string(),
        }
    }
}

impl MySqlConfig {
    /// Reject database names that cannot be used as a bare identifier.
    pub fn validate(&self) -> Result<()> {
        let valid = !self.database.is_empty()
            && self
                .database
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if valid {
            Ok(())
        } else {
            Err(StoreError::Config(format!(
                "database name {:?} must contain only ASCII letters, digits, '_' or '$'",
                self.database
            )))
        }
    }

    pub fn target(&self) -> String {
        format!(
            "mysql://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

// Keeps the password out of logs and error output.
impl fmt::Debug for MySqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Resolved connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite { path: PathBuf },
    MySql(MySqlConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from(DEFAULT_SQLITE_PATH),
        }
    }
}

impl StoreConfig {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Sqlite { .. } => BackendKind::Sqlite,
            Self::MySql(_) => BackendKind::Mysql,
        }
    }

    /// Human-readable target without credentials.
    pub fn target(&self) -> String {
        match self {
            Self::Sqlite { path } => path.display().to_string(),
            Self::MySql(config) => config.target(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_password() {
        let config = MySqlConfig {
            password: "hunter2".to_string(),
            ..MySqlConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("data_warehouse"));
    }

    #[test]
    fn validate_rejects_quoted_names() {
        let config = MySqlConfig {
            database: "dw`; DROP".to_string(),
            ..MySqlConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(MySqlConfig::default().validate().is_ok());
    }

    #[test]
    fn default_target_is_sqlite_file() {
        let config = StoreConfig::default();
        assert_eq!(config.kind(), BackendKind::Sqlite);
        assert_eq!(config.target(), DEFAULT_SQLITE_PATH);
    }
}
