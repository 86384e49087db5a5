//! DKIM selector probing.
//!
//! A domain's DKIM keys live at `<selector>._domainkey.<domain>`. Selectors
//! are not discoverable, so this check probes a list of candidates and
//! reports every selector that holds a well-formed key record.
//!
//! Probes run concurrently but their outcomes are consumed strictly in
//! selector-list order: the verdict is identical to probing one selector at
//! a time and stopping at the first ambiguous or malformed record.

use std::fmt;
use std::str::FromStr;

use futures::stream::{self, StreamExt};
use log::{debug, info};

use super::types::DkimResult;
use crate::config::{
    COMMON_DKIM_SELECTORS, DKIM_EXCERPT_MAX_CHARS, DKIM_PROBE_CONCURRENCY, GOOGLE_DKIM_SELECTORS,
    MICROSOFT_DKIM_SELECTORS,
};
use crate::dns::{contains_ignore_case, unquote_txt, DnsResolver, Query, RecordType};
use crate::error_handling::{CheckError, ResolveError};
use crate::utils::truncate_excerpt;

/// Mail providers with a known selector layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DkimProvider {
    /// Google Workspace
    Google,
    /// Microsoft 365
    Microsoft,
}

impl DkimProvider {
    /// The selectors this provider publishes keys under.
    pub fn selectors(self) -> &'static [&'static str] {
        match self {
            DkimProvider::Google => GOOGLE_DKIM_SELECTORS,
            DkimProvider::Microsoft => MICROSOFT_DKIM_SELECTORS,
        }
    }

    /// The provider tag (`google`, `microsoft`).
    pub fn as_str(self) -> &'static str {
        match self {
            DkimProvider::Google => "google",
            DkimProvider::Microsoft => "microsoft",
        }
    }
}

impl fmt::Display for DkimProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DkimProvider {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(DkimProvider::Google),
            "microsoft" => Ok(DkimProvider::Microsoft),
            _ => Err(CheckError::UnknownProvider(s.to_string())),
        }
    }
}

/// The candidate selectors for one DKIM check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectorSet {
    /// The built-in list of common selectors
    #[default]
    Common,
    /// The selectors of a known provider
    Provider(DkimProvider),
    /// Caller-supplied selectors, probed in the given order
    Custom(Vec<String>),
}

impl SelectorSet {
    /// Builds a custom set, dropping empty and repeated selectors.
    pub fn custom<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for selector in selectors {
            let selector = selector.as_ref().trim();
            if !selector.is_empty() && !unique.iter().any(|s| s == selector) {
                unique.push(selector.to_string());
            }
        }
        SelectorSet::Custom(unique)
    }

    /// Selectors in probe order.
    pub fn selectors(&self) -> Vec<&str> {
        match self {
            SelectorSet::Common => COMMON_DKIM_SELECTORS.to_vec(),
            SelectorSet::Provider(provider) => provider.selectors().to_vec(),
            SelectorSet::Custom(selectors) => selectors.iter().map(String::as_str).collect(),
        }
    }
}

impl From<Option<DkimProvider>> for SelectorSet {
    fn from(provider: Option<DkimProvider>) -> Self {
        provider.map_or(SelectorSet::Common, SelectorSet::Provider)
    }
}

/// What a single selector query found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectorProbe {
    /// Exactly one well-formed DKIM record
    Found(String),
    /// No DKIM record at this selector
    NotFound,
    /// More than one DKIM record at this selector
    Ambiguous,
    /// A single DKIM record lacking a required tag
    Malformed(String),
}

/// Whether `record` carries `v=DKIM1`, a `k=` tag and a non-empty `p=` tag.
fn is_valid_dkim_record(record: &str) -> bool {
    let tags: Vec<&str> = record.split(';').map(str::trim).collect();
    let has_version = tags.iter().any(|t| *t == "v=DKIM1");
    let has_key_type = tags.iter().any(|t| t.starts_with("k="));
    let has_public_key = tags
        .iter()
        .any(|t| t.strip_prefix("p=").is_some_and(|key| !key.trim().is_empty()));
    has_version && has_key_type && has_public_key
}

async fn probe_selector<R>(
    resolver: &R,
    domain: &str,
    selector: &str,
) -> Result<SelectorProbe, ResolveError>
where
    R: DnsResolver + ?Sized,
{
    let response = resolver.resolve(&Query::dkim(selector, domain)).await?;

    // NXDOMAIN is the normal answer for a selector that was never published
    if !response.is_success() {
        debug!(
            "DKIM selector {selector} for {domain}: DNS status {}",
            response.status
        );
        return Ok(SelectorProbe::NotFound);
    }

    let dkim_records: Vec<String> = response
        .answers_for(RecordType::Txt)
        .unwrap_or_default()
        .into_iter()
        .map(|answer| unquote_txt(&answer.data))
        .filter(|text| contains_ignore_case(text, "v=dkim1"))
        .collect();

    Ok(match dkim_records.as_slice() {
        [] => SelectorProbe::NotFound,
        [record] if is_valid_dkim_record(record) => SelectorProbe::Found(record.clone()),
        [record] => SelectorProbe::Malformed(record.clone()),
        _ => SelectorProbe::Ambiguous,
    })
}

/// Probes the selectors of `set` under `domain`.
///
/// # Errors
///
/// Returns `CheckError::Resolve` if a transport failure is the first
/// decisive outcome in selector order.
pub async fn check_dkim_selector_set<R>(
    resolver: &R,
    domain: &str,
    set: &SelectorSet,
) -> Result<DkimResult, CheckError>
where
    R: DnsResolver + ?Sized,
{
    let selectors = set.selectors();
    let mut probes = stream::iter(selectors)
        .map(move |selector| async move {
            (selector, probe_selector(resolver, domain, selector).await)
        })
        .buffered(DKIM_PROBE_CONCURRENCY);

    let mut found = Vec::new();
    while let Some((selector, probe)) = probes.next().await {
        match probe? {
            SelectorProbe::Found(record) => {
                debug!(
                    "DKIM selector {selector} for {domain}: {}",
                    truncate_excerpt(&record, DKIM_EXCERPT_MAX_CHARS)
                );
                found.push(selector.to_string());
            }
            SelectorProbe::NotFound => {}
            SelectorProbe::Ambiguous => {
                info!("DKIM check for {domain} failed: multiple records at {selector}");
                return Ok(DkimResult::invalid(format!(
                    "Multiple DKIM records found for selector: {selector}"
                )));
            }
            SelectorProbe::Malformed(record) => {
                info!("DKIM check for {domain} failed: malformed record at {selector}");
                return Ok(DkimResult::invalid(format!(
                    "Invalid DKIM record format for selector {selector}: {}",
                    truncate_excerpt(&record, DKIM_EXCERPT_MAX_CHARS)
                )));
            }
        }
    }

    if found.is_empty() {
        info!("DKIM check for {domain} failed: no valid records");
        return Ok(DkimResult::invalid("No valid DKIM records found"));
    }
    debug!("DKIM check for {domain} passed: {found:?}");
    Ok(DkimResult::valid(found))
}

/// Checks DKIM for `domain`, probing the provider's selectors if given and
/// the common selector list otherwise.
///
/// # Errors
///
/// Returns `CheckError::Resolve` on transport failure.
pub async fn check_dkim<R>(
    resolver: &R,
    domain: &str,
    provider: Option<DkimProvider>,
) -> Result<DkimResult, CheckError>
where
    R: DnsResolver + ?Sized,
{
    check_dkim_selector_set(resolver, domain, &SelectorSet::from(provider)).await
}

/// Like [`check_dkim`], taking the provider as a raw tag.
///
/// # Errors
///
/// Returns `CheckError::UnknownProvider` before issuing any query if the tag
/// is neither `google` nor `microsoft`.
pub async fn check_dkim_for_provider_tag<R>(
    resolver: &R,
    domain: &str,
    provider: Option<&str>,
) -> Result<DkimResult, CheckError>
where
    R: DnsResolver + ?Sized,
{
    let provider = provider.map(DkimProvider::from_str).transpose()?;
    check_dkim(resolver, domain, provider).await
}

/// Checks DKIM for `domain` using an explicit selector list.
///
/// # Errors
///
/// Returns `CheckError::Resolve` on transport failure.
pub async fn check_dkim_with_selectors<R>(
    resolver: &R,
    domain: &str,
    selectors: &[&str],
) -> Result<DkimResult, CheckError>
where
    R: DnsResolver + ?Sized,
{
    check_dkim_selector_set(resolver, domain, &SelectorSet::custom(selectors)).await
}
