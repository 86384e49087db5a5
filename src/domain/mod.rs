//! Domain and hostname normalization utilities.
//!
//! Key functions:
//! - `normalize_domain()` - Turns user input into a queryable domain name
//! - `is_valid_hostname()` - RFC 1035 label syntax check
//! - `is_ipv4_literal()` - Dotted-quad detection

use std::net::Ipv6Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::CheckError;

/// Maximum length of a domain name in presentation format (RFC 1035 §2.3.4).
const MAX_DOMAIN_LENGTH: usize = 253;

/// Labels of letters, digits and hyphens, 1-63 characters, not starting or
/// ending with a hyphen, joined by dots.
static HOSTNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$")
        .unwrap_or_else(|e| panic!("Invalid hostname pattern: {e}"))
});

static IPV4_LITERAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}(?:\.\d{1,3}){3}$")
        .unwrap_or_else(|e| panic!("Invalid IPv4 literal pattern: {e}"))
});

/// Returns true if `host` is syntactically a hostname per RFC 1035.
pub fn is_valid_hostname(host: &str) -> bool {
    host.len() <= MAX_DOMAIN_LENGTH && HOSTNAME_PATTERN.is_match(host)
}

/// Returns true if `host` looks like a dotted-quad IPv4 address.
///
/// Octet ranges are not checked: `999.1.1.1` is still an address literal,
/// not a hostname.
pub fn is_ipv4_literal(host: &str) -> bool {
    IPV4_LITERAL_PATTERN.is_match(host)
}

/// Normalizes a user-supplied domain.
///
/// Accepts bare domains as well as URLs (`https://Example.com/path`): the
/// scheme, path, port and trailing dot are removed and the result is
/// lower-cased.
///
/// # Errors
///
/// Returns `CheckError::InvalidDomain` if the result is empty, an IP
/// address, or not a valid hostname.
pub fn normalize_domain(input: &str) -> Result<String, CheckError> {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    // Ports only appear in URL form; a bare IPv6 literal is rejected below
    let host = match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
            name
        }
        _ => host,
    };
    let domain = host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase();

    if domain.is_empty() {
        return Err(CheckError::InvalidDomain("domain is empty".to_string()));
    }
    if is_ipv4_literal(&domain) || domain.parse::<Ipv6Addr>().is_ok() {
        return Err(CheckError::InvalidDomain(format!(
            "{domain} is an IP address, not a domain"
        )));
    }
    if !is_valid_hostname(&domain) {
        return Err(CheckError::InvalidDomain(format!(
            "{domain} is not a valid domain name"
        )));
    }
    Ok(domain)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
