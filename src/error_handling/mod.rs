//! Error handling.
//!
//! Scanning has exactly one class of fatal failure (`ScanError`); recoverable
//! conditions are absorbed by the scanner and only show up in the logs.
//! Initialization and dispatch failures have their own types.

mod types;

// Re-export public API
pub use types::{DispatchError, InitializationError, ScanError};
