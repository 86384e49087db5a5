//! Report rendering for stdout.

use colored::*;

use crate::checks::AuthReport;
use crate::config::OutputFormat;

/// Renders `report` in the requested format.
///
/// Plain output has one block per enabled check: a pass/fail marker, the
/// check name, the reason, then the payload lines indented beneath.
///
/// # Errors
///
/// Returns a `serde_json::Error` if JSON serialization fails.
pub fn render_report(report: &AuthReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Plain => Ok(render_plain(report)),
    }
}

fn render_plain(report: &AuthReport) -> String {
    let mut out = format!("{} {}\n", "Domain:".bold(), report.domain);
    for (name, verdict) in report.verdicts() {
        let marker = if verdict.is_valid() {
            "✔".green()
        } else {
            "✘".red()
        };
        let label = format!("{name:<5}");
        out.push_str(&format!("{marker} {} {}\n", label.bold(), verdict.reason()));
        for line in verdict.details() {
            out.push_str(&format!("    {}\n", line.dimmed()));
        }
    }
    out
}
