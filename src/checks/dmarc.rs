//! DMARC policy record validation.

use log::{debug, info};

use super::types::DmarcResult;
use crate::dns::{
    contains_ignore_case, starts_with_ignore_case, unquote_txt, DnsResolver, Query, RecordType,
};
use crate::error_handling::CheckError;

const DMARC_VERSION: &str = "v=dmarc1";

/// Tags a usable policy record must carry, as (search pattern, display name).
const REQUIRED_TAGS: &[(&str, &str)] = &[("p=", "p"), ("rua=", "rua")];

/// Validates the DMARC record at `_dmarc.<domain>`.
///
/// # Errors
///
/// Returns `CheckError::Resolve` if the TXT query fails in transport.
pub async fn check_dmarc<R>(resolver: &R, domain: &str) -> Result<DmarcResult, CheckError>
where
    R: DnsResolver + ?Sized,
{
    let response = resolver.resolve(&Query::dmarc(domain)).await?;

    if !response.is_success() {
        info!(
            "DMARC check for {domain} failed: DNS status {}",
            response.status
        );
        return Ok(DmarcResult::invalid("DNS query failed"));
    }

    let answers = response.answers_for(RecordType::Txt).unwrap_or_default();
    if answers.is_empty() {
        info!("DMARC check for {domain} failed: no TXT records");
        return Ok(DmarcResult::invalid("No TXT records found"));
    }

    let dmarc_records: Vec<String> = answers
        .into_iter()
        .map(|answer| unquote_txt(&answer.data))
        .filter(|text| contains_ignore_case(text, DMARC_VERSION))
        .collect();

    let record = match dmarc_records.as_slice() {
        [] => {
            info!("DMARC check for {domain} failed: no DMARC record");
            return Ok(DmarcResult::invalid("No valid DMARC record found"));
        }
        [record] => record,
        _ => {
            info!(
                "DMARC check for {domain} failed: {} DMARC records",
                dmarc_records.len()
            );
            return Ok(DmarcResult::invalid("Multiple DMARC records found"));
        }
    };

    if !starts_with_ignore_case(record, DMARC_VERSION) {
        info!("DMARC check for {domain} failed: version tag is not first");
        return Ok(DmarcResult::invalid("Invalid DMARC record format"));
    }

    let missing: Vec<&str> = REQUIRED_TAGS
        .iter()
        .filter(|(pattern, _)| !contains_ignore_case(record, pattern))
        .map(|(_, name)| *name)
        .collect();
    if !missing.is_empty() {
        info!("DMARC check for {domain} failed: missing {missing:?}");
        return Ok(DmarcResult::invalid(format!(
            "Missing required DMARC tags: {}",
            missing.join(", ")
        )));
    }

    debug!("DMARC check for {domain} passed");
    Ok(DmarcResult::valid(record.clone()))
}
