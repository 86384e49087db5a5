//! SPF record validation.
//!
//! Only structure is checked: a single `v=spf1` record whose DNS-lookup
//! mechanisms stay within the RFC 7208 §4.6.4 budget. Mechanisms are never
//! evaluated against an address.

use log::{debug, info};

use super::types::SpfResult;
use crate::config::SPF_MAX_DNS_LOOKUPS;
use crate::dns::{starts_with_ignore_case, unquote_txt, DnsResolver, Query, RecordType};
use crate::error_handling::CheckError;

const SPF_VERSION: &str = "v=spf1";

/// Mechanism prefixes that cost a DNS lookup (`a` and `mx` also count bare).
const LOOKUP_PREFIXES: &[&str] = &["include:", "a:", "mx:", "ptr:", "exists:", "redirect="];

/// Counts the DNS-lookup mechanisms of an SPF record.
///
/// Tokens are compared case-insensitively after dropping one leading
/// qualifier (`+`, `-`, `?`, `~`). Counted: bare `a` and `mx`, and tokens
/// starting with `include:`, `a:`, `mx:`, `ptr:`, `exists:` or `redirect=`.
pub fn count_dns_lookups(spf_record: &str) -> usize {
    let record = spf_record.trim();
    let mechanisms = if starts_with_ignore_case(record, SPF_VERSION) {
        &record[SPF_VERSION.len()..]
    } else {
        record
    };

    mechanisms
        .split_whitespace()
        .map(|token| {
            token
                .strip_prefix(|c: char| matches!(c, '+' | '-' | '?' | '~'))
                .unwrap_or(token)
                .to_ascii_lowercase()
        })
        .filter(|token| {
            token == "a"
                || token == "mx"
                || LOOKUP_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
        })
        .count()
}

/// Validates the SPF record of `domain`.
///
/// # Errors
///
/// Returns `CheckError::Resolve` if the TXT query fails in transport.
pub async fn check_spf<R>(resolver: &R, domain: &str) -> Result<SpfResult, CheckError>
where
    R: DnsResolver + ?Sized,
{
    let response = resolver.resolve(&Query::txt(domain)).await?;

    if !response.is_success() {
        info!(
            "SPF check for {domain} failed: DNS status {}",
            response.status
        );
        return Ok(SpfResult::invalid("DNS query failed"));
    }

    let answers = response.answers_for(RecordType::Txt).unwrap_or_default();
    if answers.is_empty() {
        info!("SPF check for {domain} failed: no TXT records");
        return Ok(SpfResult::invalid("No TXT records found"));
    }

    let spf_records: Vec<String> = answers
        .into_iter()
        .map(|answer| unquote_txt(&answer.data))
        .filter(|text| starts_with_ignore_case(text, SPF_VERSION))
        .collect();

    let record = match spf_records.as_slice() {
        [] => {
            info!("SPF check for {domain} failed: no SPF record among TXT answers");
            return Ok(SpfResult::invalid("No SPF record found"));
        }
        [record] => record,
        _ => {
            info!(
                "SPF check for {domain} failed: {} SPF records",
                spf_records.len()
            );
            return Ok(SpfResult::invalid("Multiple SPF records found"));
        }
    };

    let lookups = count_dns_lookups(record);
    if lookups > SPF_MAX_DNS_LOOKUPS {
        info!("SPF check for {domain} failed: {lookups} DNS lookups");
        return Ok(SpfResult::invalid(format!(
            "Too many DNS lookups (exceeds {SPF_MAX_DNS_LOOKUPS})"
        )));
    }

    debug!("SPF check for {domain} passed with {lookups} DNS lookups");
    Ok(SpfResult::valid(record.clone()))
}
