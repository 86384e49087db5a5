//! Configuration constants.
//!
//! This module defines the constants used throughout the crate: resolver
//! defaults, protocol limits, and the static DKIM selector tables.

/// Default DNS-over-HTTPS endpoint (Google Public DNS JSON API).
pub const DEFAULT_DOH_URL: &str = "https://dns.google/resolve";

/// Environment variable that overrides the DoH endpoint.
pub const DOH_URL_ENV: &str = "MAILAUTH_DOH_URL";

/// Per-request timeout in seconds applied by the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound accepted for `--timeout-seconds`.
pub const MAX_TIMEOUT_SECS: u64 = 120;

/// Default User-Agent sent to the DoH endpoint.
pub const DEFAULT_USER_AGENT: &str = concat!("mailauth_check/", env!("CARGO_PKG_VERSION"));

/// Maximum number of DNS-lookup mechanisms in an SPF record (RFC 7208 §4.6.4).
pub const SPF_MAX_DNS_LOOKUPS: usize = 10;

/// Characters of an offending DKIM record quoted in a failure reason.
pub const DKIM_EXCERPT_MAX_CHARS: usize = 50;

/// Number of DKIM selector queries kept in flight at once.
pub const DKIM_PROBE_CONCURRENCY: usize = 4;

/// Selectors probed when no provider is given.
///
/// Covers the defaults of common mail platforms and signing tools.
pub const COMMON_DKIM_SELECTORS: &[&str] = &[
    "default",
    "google",
    "selector1",
    "selector2",
    "k1",
    "k2",
    "k3",
    "mail",
    "dkim",
    "s1",
    "s2",
    "smtp",
    "email",
    "mandrill",
    "mxvault",
    "zoho",
    "sig1",
    "key1",
    "key2",
];

/// Google Workspace selector.
pub const GOOGLE_DKIM_SELECTORS: &[&str] = &["google"];

/// Microsoft 365 selectors.
pub const MICROSOFT_DKIM_SELECTORS: &[&str] = &["selector1", "selector2"];
