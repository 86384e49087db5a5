//! Main application modules.
//!
//! This module provides report rendering and exit-code evaluation used by the
//! main application.

pub mod exit;
pub mod output;

// Re-export public API
pub use exit::{evaluate_exit_code, EXIT_CHECK_FAILED, EXIT_ERROR, EXIT_OK};
pub use output::render_report;
