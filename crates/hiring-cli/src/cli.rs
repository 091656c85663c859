//! CLI argument definitions for the hiring warehouse ETL.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use hiring_store::BackendKind;

use hiring_cli::config::Overrides;

#[derive(Parser)]
#[command(
    name = "hiring-etl",
    version,
    about = "Load candidate applications into a star-schema warehouse and report hiring KPIs",
    long_about = "Read the semicolon-delimited candidates file, build the dimension and fact \
                  tables, load them into SQLite or MySQL, and report hiring KPIs as tables \
                  and SVG charts.\n\n\
                  Settings come from command-line flags, then the TOML config file, then \
                  built-in defaults."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file (default: ./hiring-etl.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow names and email addresses in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Args)]
pub struct StoreArgs {
    /// Warehouse backend.
    #[arg(long = "backend", value_enum, global = true)]
    pub backend: Option<BackendArg>,

    /// SQLite database file (default: data/data_warehouse.db).
    #[arg(long = "sqlite-path", value_name = "PATH", global = true)]
    pub sqlite_path: Option<PathBuf>,

    #[arg(long = "mysql-host", value_name = "HOST", global = true)]
    pub mysql_host: Option<String>,

    #[arg(long = "mysql-port", value_name = "PORT", global = true)]
    pub mysql_port: Option<u16>,

    #[arg(long = "mysql-user", value_name = "USER", global = true)]
    pub mysql_user: Option<String>,

    #[arg(long = "mysql-password", value_name = "PASSWORD", global = true)]
    pub mysql_password: Option<String>,

    /// Database to use; created when missing.
    #[arg(long = "mysql-database", value_name = "NAME", global = true)]
    pub mysql_database: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full ETL into the configured warehouse.
    Load(LoadArgs),

    /// Build the star schema and write CSV exports without a database.
    Transform(TransformArgs),

    /// Run the KPI queries against a loaded warehouse.
    Report(ReportArgs),

    /// Drop and recreate the warehouse tables, then describe them.
    Schema,
}

#[derive(Args)]
pub struct InputArgs {
    /// Candidates file (default: data/candidates.csv).
    #[arg(value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Field separator of the candidates file.
    #[arg(long = "separator", value_name = "CHAR")]
    pub separator: Option<char>,
}

#[derive(Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also write each table as a CSV file into this directory.
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct TransformArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the CSV exports.
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: PathBuf,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Directory for SVG charts (default: charts).
    #[arg(long = "chart-dir", value_name = "DIR")]
    pub chart_dir: Option<PathBuf>,

    /// Print tables only.
    #[arg(long = "no-charts", conflicts_with = "chart_dir")]
    pub no_charts: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BackendArg {
    Sqlite,
    Mysql,
}

impl From<BackendArg> for BackendKind {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Sqlite => Self::Sqlite,
            BackendArg::Mysql => Self::Mysql,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl Cli {
    /// Command-line values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        let store = &self.store;
        let mut overrides = Overrides {
            backend: store.backend.map(Into::into),
            sqlite_path: store.sqlite_path.clone(),
            mysql_host: store.mysql_host.clone(),
            mysql_port: store.mysql_port,
            mysql_user: store.mysql_user.clone(),
            mysql_password: store.mysql_password.clone(),
            mysql_database: store.mysql_database.clone(),
            ..Overrides::default()
        };
        match &self.command {
            Command::Load(LoadArgs { input, .. }) | Command::Transform(TransformArgs { input, .. }) => {
                overrides.input.clone_from(&input.input);
                overrides.separator = input.separator;
            }
            Command::Report(args) => {
                overrides.chart_dir.clone_from(&args.chart_dir);
                overrides.no_charts = args.no_charts;
            }
            Command::Schema => {}
        }
        overrides
    }
}
