//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client used to send parsed requests.
///
/// Creates a `reqwest::Client` configured with:
/// - Timeout from the configuration
/// - Certificate verification disabled when `--insecure` is set
/// - Default redirect policy (up to 10 hops)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .danger_accept_invalid_certs(config.insecure)
        .build()
}
