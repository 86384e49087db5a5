//! DNS resolver initialization.

use log::debug;

use super::client::init_client;
use crate::config::Config;
use crate::dns::DohResolver;
use crate::error_handling::InitializationError;

/// Initializes the DNS-over-HTTPS resolver described by `config`.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the underlying HTTP
/// client cannot be built.
pub fn init_resolver(config: &Config) -> Result<DohResolver, InitializationError> {
    let client = init_client(config)?;
    debug!(
        "Using DNS-over-HTTPS endpoint {} (timeout {}s)",
        config.doh_url, config.timeout_seconds
    );
    Ok(DohResolver::new(client, config.doh_url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_resolver_uses_configured_endpoint() {
        let config = Config {
            doh_url: "http://127.0.0.1:8053/resolve".to_string(),
            ..Config::default()
        };
        let resolver = init_resolver(&config).unwrap();
        assert_eq!(resolver.endpoint(), "http://127.0.0.1:8053/resolve");
    }

    #[test]
    fn test_init_resolver_defaults_to_google() {
        let resolver = init_resolver(&Config::default()).unwrap();
        assert_eq!(resolver.endpoint(), crate::config::DEFAULT_DOH_URL);
    }
}
