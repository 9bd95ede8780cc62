//! http_batch library: request batch scanning and dispatch
//!
//! A request batch is a plain-text file describing HTTP requests, one block
//! per request, with `#` comments, `@name = value` symbol definitions, and
//! `{{...}}` placeholders (`{{$uuid}}`, `{{$time Europe/Berlin}}`, `{{name}}`):
//!
//! ```text
//! @host = localhost:8080
//!
//! POST http://{{host}}/items HTTP/1.1
//! Content-Type: application/json
//!
//! {"id": "{{$uuid}}", "ts": "{{$time}}"}
//! ```
//!
//! # Example
//!
//! ```no_run
//! use http_batch::parse_all_str;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let requests = parse_all_str("GET http://example.com/\n")?;
//! for request in &requests {
//!     println!("{} {}", request.method(), request.url());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Sending requests requires a Tokio runtime (see [`run_batch`]).

#![warn(missing_docs)]

pub mod config;
pub mod dispatch;
pub mod error_handling;
pub mod initialization;
pub mod scan;

// Re-export public API
pub use config::{Config, DryRunFormat, LogFormat, LogLevel};
pub use dispatch::{run_batch, RunReport};
pub use error_handling::{DispatchError, InitializationError, ScanError};
pub use scan::{
    parse_all, parse_all_channel, parse_all_str, parse_one, parse_one_str, Header, HttpVersion,
    Method, Request, Scanner, SymbolTable,
};
