//! DNS-over-HTTPS resolver client.
//!
//! The checks depend only on the [`DnsResolver`] trait. [`DohResolver`] is the
//! production implementation, speaking the Google-style JSON API
//! (`GET /resolve?name=<name>&type=<TXT|MX>`).

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;

use super::types::{Query, ResolverResponse};
use crate::error_handling::ResolveError;

/// Media type of DoH JSON responses.
const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

/// Resolves a single DNS question.
///
/// Implementations must not retry or swallow transport failures: any error is
/// returned as-is and terminates the check that issued the query.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolves `query`, returning the decoded response.
    async fn resolve(&self, query: &Query) -> Result<ResolverResponse, ResolveError>;
}

/// JSON DNS-over-HTTPS client backed by `reqwest`.
///
/// Timeouts are whatever the supplied client was built with.
#[derive(Debug, Clone)]
pub struct DohResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl DohResolver {
    /// Creates a resolver that sends queries to `endpoint`.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint queries are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DnsResolver for DohResolver {
    async fn resolve(&self, query: &Query) -> Result<ResolverResponse, ResolveError> {
        let record_type = query.record_type.to_string();
        debug!("DoH query {} {} via {}", query.name, record_type, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("name", query.name.as_str()), ("type", record_type.as_str())])
            .header(ACCEPT, DNS_JSON_CONTENT_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::HttpStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
            });
        }

        // Decode from bytes so a malformed body maps to Decode, not Request
        let body = response.bytes().await?;
        let decoded: ResolverResponse =
            serde_json::from_slice(&body).map_err(|source| ResolveError::Decode {
                name: query.name.clone(),
                source,
            })?;

        debug!(
            "DoH response for {} {}: status={}, answers={}",
            query.name,
            record_type,
            decoded.status,
            decoded.answers.as_ref().map_or(0, Vec::len)
        );
        Ok(decoded)
    }
}
