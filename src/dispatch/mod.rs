//! Sending parsed requests and printing what comes back.
//!
//! This module provides:
//! - Conversion of [`crate::scan::Request`] into `reqwest` requests
//! - Request/response dumps for `--verbose`, `--include`, and `--dry-run`
//! - The batch run loop used by the binary

mod convert;
mod dump;
mod run;

// Re-export public API
pub use convert::{send, to_reqwest};
pub use dump::{dump_request, format_response_head, request_to_json};
pub use run::{run_batch, RunReport};
