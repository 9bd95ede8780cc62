//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `http_batch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status
//!
//! All core functionality is implemented in the library crate.

use std::io::Write;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use http_batch::initialization::init_logger_with;
use http_batch::{run_batch, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run_batch(&config, &mut out).await;
    out.flush().context("Failed to flush output")?;

    match result {
        Ok(report) => {
            log::info!("Processed {} request(s)", report.requests);
            Ok(())
        }
        Err(e) => {
            eprintln!("http_batch error: {:#}", e);
            process::exit(1);
        }
    }
}
