//! Drives a whole batch: scan, send, print.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use anyhow::{Context, Result};
use log::info;
use reqwest::Client;

use crate::config::{Config, DryRunFormat};
use crate::dispatch::convert::send;
use crate::dispatch::dump::{dump_request, format_response_head, request_to_json};
use crate::initialization::init_client;
use crate::scan::{parse_all_channel, Request};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Requests taken from the batch (sent, or printed in dry-run mode)
    pub requests: usize,
}

/// Scans the batch named by `config` and sends each request in order,
/// writing response bodies (and, on request, dumps) to `out`.
///
/// The scanner runs one request ahead of the transport. The first transport
/// failure stops the run; requests already sent stay sent.
///
/// # Errors
///
/// Fails when the input cannot be opened, the batch is malformed, the client
/// cannot be built, a request fails, or `out` cannot be written.
pub async fn run_batch<W: Write>(config: &Config, out: &mut W) -> Result<RunReport> {
    let reader: Box<dyn BufRead + Send> = if config.reads_stdin() {
        info!("Reading request batch from stdin");
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = File::open(&config.file)
            .with_context(|| format!("Failed to open {}", config.file.display()))?;
        Box::new(BufReader::new(file))
    };

    let client = if config.dry_run {
        None
    } else {
        Some(init_client(config).context("Failed to initialize HTTP client")?)
    };

    let (mut requests, scan) = parse_all_channel(reader);
    let mut count = 0;
    while let Some(request) = requests.recv().await {
        count += 1;
        match &client {
            Some(client) => send_and_print(client, config, &request, out).await?,
            None => print_dry_run(config, &request, out)?,
        }
    }

    scan.await
        .context("Request scanner task failed")?
        .context("Failed to parse request batch")?;

    Ok(RunReport { requests: count })
}

async fn send_and_print<W: Write>(
    client: &Client,
    config: &Config,
    request: &Request,
    out: &mut W,
) -> Result<()> {
    if config.verbose {
        write!(out, "----- Request -----\n\n{}\n", dump_request(request))?;
    }

    let response = send(client, request).await;
    if config.verbose {
        write!(out, "----- Response -----\n\n")?;
    }
    let response =
        response.with_context(|| format!("{} {} failed", request.method(), request.url()))?;
    info!(
        "{} {} -> {}",
        request.method(),
        request.url(),
        response.status()
    );

    if config.verbose || config.include {
        write!(
            out,
            "{}",
            format_response_head(response.version(), response.status(), response.headers())
        )?;
    }
    let body = response
        .bytes()
        .await
        .context("Failed to read response body")?;
    out.write_all(&body)?;
    writeln!(out)?;
    Ok(())
}

fn print_dry_run<W: Write>(config: &Config, request: &Request, out: &mut W) -> Result<()> {
    match config.dry_run_format {
        DryRunFormat::Http => writeln!(out, "{}", dump_request(request))?,
        DryRunFormat::Json => writeln!(out, "{}", request_to_json(request)?)?,
    }
    Ok(())
}
