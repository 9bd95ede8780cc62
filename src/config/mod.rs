//! Application configuration and constants.
//!
//! This module provides:
//! - Scanner defaults and grammar constants
//! - Dispatch constants (timeouts, handoff capacity)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, DryRunFormat, LogFormat, LogLevel};
