//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};
use strum_macros::{Display, EnumIter};

use crate::checks::{CheckOptions, DkimProvider, SelectorSet};
use crate::config::constants::{
    DEFAULT_DOH_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DOH_URL_ENV, MAX_TIMEOUT_SECS,
};
use crate::domain::{is_valid_hostname, normalize_domain};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the check report written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per check with a pass/fail marker
    Plain,
    /// The serialized report as a single JSON document
    Json,
}

/// Exit code policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the checks ran
    Never,
    /// Exit 2 if any enabled check is invalid
    AnyInvalid,
}

/// The record checks that can be enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, EnumIter, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum CheckKind {
    /// DKIM selector probing
    Dkim,
    /// SPF record and lookup budget
    Spf,
    /// DMARC policy record
    Dmarc,
    /// MX record structure
    Mx,
}

/// Library and CLI configuration.
///
/// # Examples
///
/// ```no_run
/// use mailauth_check::Config;
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mailauth_check",
    version,
    about = "Validate DKIM, SPF, DMARC and MX records over DNS-over-HTTPS"
)]
pub struct Config {
    /// Domain to check (a URL is accepted; its host is used)
    pub domain: String,

    /// Checks to run (repeatable or comma-separated); all when omitted
    #[arg(long = "check", value_enum, value_delimiter = ',')]
    pub checks: Vec<CheckKind>,

    /// Probe only the selectors of this provider (google, microsoft)
    #[arg(long)]
    pub dkim_provider: Option<DkimProvider>,

    /// Probe these DKIM selectors instead of the built-in list (repeatable)
    #[arg(long = "dkim-selector")]
    pub dkim_selectors: Vec<String>,

    /// DNS-over-HTTPS JSON endpoint
    #[arg(long, env = DOH_URL_ENV, default_value = DEFAULT_DOH_URL)]
    pub doh_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Exit code policy
    #[arg(long, value_enum, default_value_t = FailOn::AnyInvalid)]
    pub fail_on: FailOn,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: "example.com".to_string(),
            checks: Vec::new(),
            dkim_provider: None,
            dkim_selectors: Vec::new(),
            doh_url: DEFAULT_DOH_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: OutputFormat::Plain,
            fail_on: FailOn::AnyInvalid,
        }
    }
}

impl Config {
    /// Checks field values before any network resource is created.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with a message describing the
    /// accepted values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Err(e) = normalize_domain(&self.domain) {
            return Err(ConfigValidationError::new("domain", e.to_string()));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.timeout_seconds > MAX_TIMEOUT_SECS {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                format!("must be at most {MAX_TIMEOUT_SECS} seconds"),
            ));
        }

        if !self.doh_url.starts_with("https://") && !self.doh_url.starts_with("http://") {
            return Err(ConfigValidationError::new(
                "doh_url",
                format!(
                    "must start with https:// or http:// (got '{}')",
                    self.doh_url
                ),
            ));
        }

        if self.dkim_provider.is_some() && !self.dkim_selectors.is_empty() {
            return Err(ConfigValidationError::new(
                "dkim_selectors",
                "cannot be combined with --dkim-provider",
            ));
        }
        if let Some(bad) = self
            .dkim_selectors
            .iter()
            .find(|s| !is_valid_hostname(s.trim()))
        {
            return Err(ConfigValidationError::new(
                "dkim_selectors",
                format!("'{bad}' is not a valid selector label"),
            ));
        }

        Ok(())
    }

    /// Checks to run, in report order. All checks when none were selected.
    pub fn enabled_checks(&self) -> Vec<CheckKind> {
        use strum::IntoEnumIterator;

        if self.checks.is_empty() {
            return CheckKind::iter().collect();
        }
        CheckKind::iter()
            .filter(|kind| self.checks.contains(kind))
            .collect()
    }

    /// DKIM selectors to probe, derived from the provider and selector flags.
    pub fn selector_set(&self) -> SelectorSet {
        if !self.dkim_selectors.is_empty() {
            return SelectorSet::custom(self.dkim_selectors.iter().map(|s| s.trim()));
        }
        SelectorSet::from(self.dkim_provider)
    }

    /// Options for [`crate::check_all`].
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            checks: self.enabled_checks(),
            selectors: self.selector_set(),
        }
    }
}
