//! Configuration constants.
//!
//! This module defines the defaults applied while scanning request blocks and
//! the operational parameters used when dispatching them.

// Request line defaults
/// Method used when a request line only carries a target
pub const DEFAULT_METHOD: &str = "GET";
/// Target used when a request line only carries a method
pub const DEFAULT_TARGET: &str = "/";
/// Scheme assumed when the target does not name one
pub const DEFAULT_SCHEME: &str = "http";
/// Host used for origin-form targets (`/path`) until a `Host` header names one
pub const DEFAULT_HOST: &str = "localhost";
/// Protocol version stamped on every parsed request.
///
/// Any version token present in the source line is ignored.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Header whose value also rewrites the request URL's authority.
///
/// Matched case-sensitively.
pub const HEADER_HOST: &str = "Host";

// Line classification
/// Prefix marking a comment line
pub const COMMENT_PREFIX: char = '#';
/// Prefix marking a symbol definition (`@name = value`)
pub const SYMBOL_PREFIX: char = '@';
/// Separator between a symbol's name and its value
pub const SYMBOL_SEPARATOR: char = '=';

// Placeholders
/// Opening delimiter of a placeholder span
pub const PLACEHOLDER_OPEN: &str = "{{";
/// Closing delimiter of a placeholder span
pub const PLACEHOLDER_CLOSE: &str = "}}";
/// Built-in verb generating a random v4 identifier
pub const VERB_UUID: &str = "$uuid";
/// Built-in verb formatting the current instant
pub const VERB_TIME: &str = "$time";
/// `$uuid` argument selecting the hyphen-less form
pub const UUID_SHORT_ARG: &str = "short";

// Dispatch
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Input path that selects stdin
pub const STDIN_PATH: &str = "-";
/// Capacity of the handoff queue between the scanner and the dispatcher.
///
/// One slot keeps parsing exactly one request ahead of transmission.
pub const HANDOFF_CAPACITY: usize = 1;
