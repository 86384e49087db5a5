//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoint, timeouts, protocol limits)
//! - The static DKIM selector tables
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{CheckKind, Config, FailOn, LogFormat, LogLevel, OutputFormat};
