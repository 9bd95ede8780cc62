//! Request batch scanning.
//!
//! This module turns a line-oriented request batch into [`Request`] values:
//! - `symbols`: the `@name = value` table shared across one batch
//! - `placeholder` / `time_format`: `{{...}}` resolution (`$uuid`, `$time`, symbols)
//! - `preprocess`: comment/definition/content classification and expansion
//! - `parser`: the request-line → headers → body state machine
//! - `batch`: the pull-based [`Scanner`] and its convenience wrappers
//!
//! Only a malformed request line stops a scan; every other irregularity is
//! absorbed (see [`crate::error_handling::ScanError`]).

mod batch;
mod parser;
mod placeholder;
mod preprocess;
mod request;
mod symbols;
mod time_format;

// Re-export public API
pub use batch::{parse_all, parse_all_channel, parse_all_str, parse_one, parse_one_str, Scanner};
pub use parser::{BlockParser, ParserState};
pub use placeholder::{expand_placeholders, resolve, Verb};
pub use preprocess::{Directive, LinePreprocessor};
pub use request::{resolve_target, Header, HttpVersion, Method, Request};
pub use symbols::SymbolTable;
pub use time_format::{format_fixed, format_with_pattern, render_time, translate_pattern};
