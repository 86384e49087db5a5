//! Exit code policy.

use crate::checks::AuthReport;
use crate::config::FailOn;

/// Every enabled check ran (and passed, under `--fail-on any-invalid`).
pub const EXIT_OK: i32 = 0;
/// A configuration, initialization or transport error stopped the run.
pub const EXIT_ERROR: i32 = 1;
/// At least one enabled check was invalid.
pub const EXIT_CHECK_FAILED: i32 = 2;

/// Maps a completed report to the process exit code.
pub fn evaluate_exit_code(fail_on: FailOn, report: &AuthReport) -> i32 {
    match fail_on {
        FailOn::Never => EXIT_OK,
        FailOn::AnyInvalid if report.all_valid() => EXIT_OK,
        FailOn::AnyInvalid => EXIT_CHECK_FAILED,
    }
}
