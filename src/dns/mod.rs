//! DNS resolution over HTTPS.
//!
//! This module provides the resolver contract the record checks depend on:
//! - Query and response types modelled on the DoH JSON API
//! - The [`DnsResolver`] trait and the `reqwest`-backed [`DohResolver`]
//! - TXT text normalization (quote stripping, string concatenation)
//!
//! Only TXT and MX lookups are supported.

mod client;
mod extract;
mod types;

// Re-export public API
pub use client::{DnsResolver, DohResolver};
pub use extract::{contains_ignore_case, starts_with_ignore_case, unquote_txt};
pub use types::{AnswerRecord, Query, RecordType, ResolverResponse};
