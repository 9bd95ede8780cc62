//! Error type definitions.
//!
//! This module defines the error types surfaced by scanning, initialization,
//! and dispatch.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Fatal scanning failures.
///
/// Everything else the scanner meets (malformed definitions, unterminated
/// placeholders, unknown symbols, unknown zones) is absorbed and never
/// reaches the caller.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The request target could not be turned into an absolute URL.
    #[error("invalid request target {target:?}: {source}")]
    InvalidTarget {
        /// Target as written in the request line, after placeholder expansion
        target: String,
        /// Why `url` rejected it
        #[source]
        source: url::ParseError,
    },

    /// The protocol version stamped on the request is not `HTTP/<major>.<minor>`.
    #[error("unknown http version: {0}")]
    UnsupportedVersion(String),

    /// Reading the input failed.
    #[error("failed to read request batch: {0}")]
    Io(#[from] std::io::Error),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures while turning a parsed request into a transport request or sending it.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A header name is not a valid HTTP token.
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    /// A header value contains bytes HTTP does not allow.
    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),

    /// The transport failed.
    #[error("HTTP request error: {0}")]
    Request(#[from] ReqwestError),
}
