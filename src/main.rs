//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mailauth_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mailauth_check::app::{evaluate_exit_code, render_report, EXIT_ERROR};
use mailauth_check::initialization::{init_logger_with, init_resolver};
use mailauth_check::{check_all, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = config.validate() {
        eprintln!("mailauth_check: invalid configuration: {e}");
        process::exit(EXIT_ERROR);
    }

    match run(&config).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("mailauth_check error: {e:#}");
            process::exit(EXIT_ERROR);
        }
    }
}

async fn run(config: &Config) -> Result<i32> {
    let resolver = init_resolver(config).context("Failed to initialize DNS-over-HTTPS resolver")?;

    let report = check_all(&resolver, &config.domain, &config.check_options())
        .await
        .with_context(|| format!("Failed to check {}", config.domain))?;

    let rendered = render_report(&report, config.output).context("Failed to render report")?;
    println!("{}", rendered.trim_end());

    Ok(evaluate_exit_code(config.fail_on, &report))
}
