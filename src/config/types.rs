//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_TIMEOUT_SECS, STDIN_PATH};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How `--dry-run` prints the parsed requests.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DryRunFormat {
    /// HTTP/1.1 message text, as it would go over the wire
    Http,
    /// One JSON object per request
    Json,
}

/// Runtime configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically.
///
/// # Examples
///
/// ```no_run
/// use http_batch::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("requests.http"),
///     verbose: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "http_batch",
    about = "Send the HTTP requests described in a request batch file",
    version
)]
pub struct Config {
    /// File to read the request batch from (`-` reads stdin)
    #[arg(default_value = STDIN_PATH)]
    pub file: PathBuf,

    /// Include protocol response headers in the output
    #[arg(short = 'i', long)]
    pub include: bool,

    /// Make the operation more talkative
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Parse and print the requests without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format used by `--dry-run`
    #[arg(long, value_enum, default_value_t = DryRunFormat::Http)]
    pub dry_run_format: DryRunFormat,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Whether the batch is read from stdin rather than a file.
    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == STDIN_PATH
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(STDIN_PATH),
            include: false,
            verbose: false,
            insecure: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            dry_run: false,
            dry_run_format: DryRunFormat::Http,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}
