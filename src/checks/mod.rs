//! Email-authentication record checks.
//!
//! Each check issues its DNS queries through a [`DnsResolver`] and returns a
//! verdict. A record that violates a rule is a normal `is_valid: false`
//! result; only transport failures and caller mistakes are errors.
//!
//! - [`check_dkim`] probes DKIM selectors under `_domainkey`
//! - [`check_spf`] validates the single `v=spf1` record and its lookup budget
//! - [`check_dmarc`] validates the `_dmarc` policy record
//! - [`check_mx`] validates MX preference and exchange syntax
//! - [`check_all`] runs the enabled checks concurrently

mod dkim;
mod dmarc;
mod mx;
mod spf;
mod types;

#[cfg(test)]
mod test_helpers;

use std::future::Future;

use log::debug;
use strum::IntoEnumIterator;

pub use dkim::{
    check_dkim, check_dkim_for_provider_tag, check_dkim_selector_set, check_dkim_with_selectors,
    DkimProvider, SelectorSet,
};
pub use dmarc::check_dmarc;
pub use mx::check_mx;
pub use spf::{check_spf, count_dns_lookups};
pub use types::{AuthReport, DkimResult, DmarcResult, MxEntry, MxResult, SpfResult, Verdict};

use crate::config::CheckKind;
use crate::dns::DnsResolver;
use crate::domain::normalize_domain;
use crate::error_handling::CheckError;

/// Which checks [`check_all`] runs, and how DKIM picks selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Enabled checks; an empty list runs nothing
    pub checks: Vec<CheckKind>,
    /// Selector candidates for the DKIM check
    pub selectors: SelectorSet,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            checks: CheckKind::iter().collect(),
            selectors: SelectorSet::Common,
        }
    }
}

impl CheckOptions {
    fn enabled(&self, kind: CheckKind) -> bool {
        self.checks.contains(&kind)
    }
}

async fn run_if<T, F>(enabled: bool, check: F) -> Result<Option<T>, CheckError>
where
    F: Future<Output = Result<T, CheckError>>,
{
    if enabled {
        check.await.map(Some)
    } else {
        Ok(None)
    }
}

/// Normalizes `domain` and runs the enabled checks concurrently.
///
/// # Errors
///
/// Returns `CheckError::InvalidDomain` before any query if `domain` cannot
/// be normalized, and `CheckError::Resolve` if any enabled check hits a
/// transport failure.
pub async fn check_all<R>(
    resolver: &R,
    domain: &str,
    options: &CheckOptions,
) -> Result<AuthReport, CheckError>
where
    R: DnsResolver + ?Sized,
{
    let domain = normalize_domain(domain)?;
    debug!("Running {:?} for {domain}", options.checks);

    let (dkim, spf, dmarc, mx) = tokio::join!(
        run_if(
            options.enabled(CheckKind::Dkim),
            check_dkim_selector_set(resolver, &domain, &options.selectors)
        ),
        run_if(
            options.enabled(CheckKind::Spf),
            check_spf(resolver, &domain)
        ),
        run_if(
            options.enabled(CheckKind::Dmarc),
            check_dmarc(resolver, &domain)
        ),
        run_if(options.enabled(CheckKind::Mx), check_mx(resolver, &domain)),
    );

    Ok(AuthReport {
        domain,
        dkim: dkim?,
        spf: spf?,
        dmarc: dmarc?,
        mx: mx?,
    })
}
