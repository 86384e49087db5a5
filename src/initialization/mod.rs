//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources the
//! binary needs before running any check:
//! - Logger (plain or JSON lines)
//! - HTTP client (timeout and user agent)
//! - DNS-over-HTTPS resolver
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
