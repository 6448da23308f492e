//! CLI argument definitions for the fixed-width converter.

use std::path::PathBuf;

use std::io::{self, IsTerminal};

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "fwconv",
    version,
    about = "Convert fixed-width text files to CSV using field schemas",
    long_about = "Convert fixed-width text files to CSV.\n\n\
                  Field positions come from YAML schemas chosen by file name, by the\n\
                  administration header of the input, or explicitly with --schema."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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
}

impl Cli {
    /// Logging setup for these flags.
    ///
    /// `--log-level` wins over `-v`/`-q`; `RUST_LOG` applies only when neither
    /// is given.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        let ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig::default()
            .with_level_filter(explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()))
            .with_env_filter(!self.verbosity.is_present() && explicit.is_none())
            .with_format(format)
            .with_log_file(self.log_file.clone())
            .with_ansi(ansi)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a fixed-width file to CSV.
    Convert(ConvertArgs),

    /// Convert a CSV field layout into a YAML schema.
    CsvToSchema(CsvToSchemaArgs),

    /// List the built-in schema templates.
    Templates,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Fixed-width input file.
    #[arg(
        value_name = "INPUT",
        required_unless_present = "export_templates",
        conflicts_with = "export_templates"
    )]
    pub input: Option<PathBuf>,

    /// Output CSV path (default: <INPUT stem>_output.csv next to the input).
    #[arg(short = 'o', long = "output-file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Folder searched for schema files (default: current directory).
    #[arg(long = "schema-folder", value_name = "DIR", env = "FWCONV_SCHEMA_DIR")]
    pub schema_folder: Option<PathBuf>,

    /// Schema file to use instead of resolving one from the folder.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Write the built-in templates to DIR instead of converting.
    #[arg(long = "export-templates", value_name = "DIR")]
    pub export_templates: Option<PathBuf>,

    /// Drop the first line of the input before extraction.
    #[arg(long = "skip-header")]
    pub skip_header: bool,

    /// Emit every schema field, ignoring keep flags.
    #[arg(long = "all-columns")]
    pub all_columns: bool,

    /// Reject schema fields that omit `keep` instead of keeping them.
    #[arg(long = "strict-keep")]
    pub strict_keep: bool,

    /// When to append the `school_year` and `test_name` columns.
    #[arg(long = "admin-columns", value_enum, default_value = "auto")]
    pub admin_columns: AdminColumnsArg,

    /// Convert and report without writing the CSV.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CsvToSchemaArgs {
    /// CSV field layout with start, end and name columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Output YAML path (default: <CSV stem>_schema.yaml next to the CSV).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Header of the 1-based start position column.
    #[arg(long = "start-column", default_value = "start")]
    pub start_column: String,

    /// Header of the 1-based inclusive end position column.
    #[arg(long = "end-column", default_value = "end")]
    pub end_column: String,

    /// Header of the output name column.
    #[arg(long = "name-column", default_value = "output_field")]
    pub name_column: String,

    /// Header of the keep flag column; may be absent from the CSV.
    #[arg(long = "keep-column", default_value = "keep")]
    pub keep_column: String,

    /// Header of a preferred-name column; empty cells fall back to --name-column.
    #[arg(long = "mapped-name-column", value_name = "HEADER")]
    pub mapped_name_column: Option<String>,

    /// Keep names exactly as written (no dash or line break cleanup).
    #[arg(long = "raw-names")]
    pub raw_names: bool,

    /// Reject rows with an empty keep cell instead of keeping them.
    #[arg(long = "strict-keep")]
    pub strict_keep: bool,
}

/// CLI choices for the administration columns.
#[derive(Clone, Copy, ValueEnum)]
pub enum AdminColumnsArg {
    /// Only when the schema was picked from the administration header.
    Auto,
    Always,
    Never,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
