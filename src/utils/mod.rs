//! Utility functions.
//!
//! This module provides string helpers shared by the record checks.

pub mod sanitize;

pub use sanitize::truncate_excerpt;
