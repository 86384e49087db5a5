//! mailauth_check library: email-authentication DNS record validation
//!
//! This library checks the DKIM, SPF, DMARC and MX records of a domain over a
//! DNS-over-HTTPS JSON resolver and reports a structural verdict for each.
//! It validates record syntax and policy shape only: keys are not verified
//! and SPF mechanisms are not evaluated against an address.
//!
//! # Example
//!
//! ```no_run
//! use mailauth_check::initialization::init_resolver;
//! use mailauth_check::{check_all, check_spf, CheckOptions, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = init_resolver(&Config::default())?;
//!
//! let spf = check_spf(&resolver, "example.com").await?;
//! println!("SPF: {} ({})", spf.is_valid, spf.reason);
//!
//! let report = check_all(&resolver, "example.com", &CheckOptions::default()).await?;
//! println!("{} of the enabled checks failed", report.invalid_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod checks;
pub mod config;
pub mod dns;
mod domain;
mod error_handling;
pub mod initialization;
mod utils;

// Re-export public API
pub use checks::{
    check_all, check_dkim, check_dkim_for_provider_tag, check_dkim_selector_set,
    check_dkim_with_selectors, check_dmarc, check_mx, check_spf, count_dns_lookups, AuthReport,
    CheckOptions, DkimProvider, DkimResult, DmarcResult, MxEntry, MxResult, SelectorSet,
    SpfResult, Verdict,
};
pub use config::{CheckKind, Config, FailOn, LogFormat, LogLevel, OutputFormat};
pub use dns::{DnsResolver, DohResolver, Query, RecordType, ResolverResponse};
pub use domain::normalize_domain;
pub use error_handling::{CheckError, ConfigValidationError, InitializationError, ResolveError};
