//! MX record structural validation.

use std::collections::HashSet;

use log::{debug, info};

use super::types::{MxEntry, MxResult};
use crate::dns::{DnsResolver, Query, RecordType};
use crate::domain::{is_ipv4_literal, is_valid_hostname};
use crate::error_handling::CheckError;

/// An MX answer split into its raw preference token and normalized exchange.
struct RawMx {
    preference: String,
    exchange: String,
}

impl RawMx {
    fn parse(data: &str) -> Self {
        let data = data.trim();
        let (preference, exchange) = data.split_once(' ').unwrap_or((data, ""));
        let exchange = exchange.trim().to_ascii_lowercase();
        let exchange = exchange
            .strip_suffix('.')
            .map(str::to_string)
            .unwrap_or(exchange);
        Self {
            preference: preference.to_string(),
            exchange,
        }
    }
}

/// Validates the MX records of `domain`.
///
/// # Errors
///
/// Returns `CheckError::Resolve` if the MX query fails in transport.
pub async fn check_mx<R>(resolver: &R, domain: &str) -> Result<MxResult, CheckError>
where
    R: DnsResolver + ?Sized,
{
    let response = resolver.resolve(&Query::mx(domain)).await?;

    if !response.is_success() {
        info!(
            "MX check for {domain} failed: DNS status {}",
            response.status
        );
        return Ok(MxResult::invalid("DNS query failed"));
    }

    let Some(answers) = response.answers_for(RecordType::Mx) else {
        info!("MX check for {domain} failed: no Answer section");
        return Ok(MxResult::invalid("No MX records found"));
    };

    let records: Vec<RawMx> = answers
        .into_iter()
        .map(|answer| RawMx::parse(&answer.data))
        .collect();
    if records.is_empty() {
        info!("MX check for {domain} failed: empty Answer section");
        return Ok(MxResult::invalid("No valid MX records found"));
    }

    let mut seen = HashSet::new();
    if !records.iter().all(|r| seen.insert(r.exchange.as_str())) {
        info!("MX check for {domain} failed: duplicate exchanges");
        return Ok(MxResult::invalid("Duplicate MX exchanges found"));
    }

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let Ok(preference) = record.preference.parse::<u16>() else {
            info!("MX check for {domain} failed: bad preference {}", record.preference);
            return Ok(MxResult::invalid(format!(
                "Invalid MX preference: {}",
                record.preference
            )));
        };
        if is_ipv4_literal(&record.exchange) {
            info!("MX check for {domain} failed: address literal {}", record.exchange);
            return Ok(MxResult::invalid(format!(
                "MX exchange cannot be an IP address: {}",
                record.exchange
            )));
        }
        if !is_valid_hostname(&record.exchange) {
            info!("MX check for {domain} failed: bad hostname {:?}", record.exchange);
            return Ok(MxResult::invalid(format!(
                "Invalid MX exchange hostname: {}",
                record.exchange
            )));
        }
        entries.push(MxEntry {
            preference,
            exchange: record.exchange,
        });
    }

    debug!("MX check for {domain} passed: {} records", entries.len());
    Ok(MxResult::valid(entries))
}
