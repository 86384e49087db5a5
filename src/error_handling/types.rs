//! Error type definitions.
//!
//! This module defines the error types used throughout the crate. Validation
//! failures are not errors: they are returned as results with `is_valid: false`.
//! The types here cover the failures that terminate a call.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Transport-tier failures raised by a [`crate::dns::DnsResolver`].
///
/// These are never retried and never converted into validation results.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The request could not be sent or the body could not be read.
    #[error("DNS-over-HTTPS request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The upstream answered with a non-2xx HTTP status.
    #[error("DNS-over-HTTPS endpoint {endpoint} returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code returned by the endpoint
        status: u16,
        /// Endpoint that was queried
        endpoint: String,
    },

    /// The upstream body was not a valid DNS JSON response.
    #[error("Malformed DNS-over-HTTPS response for {name}: {source}")]
    Decode {
        /// Query name the response belonged to
        name: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by the record checks to their caller.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The resolver failed to produce a response.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A DKIM provider tag outside the recognized set was supplied.
    #[error("Unknown DKIM provider '{0}' (expected 'google' or 'microsoft')")]
    UnknownProvider(String),

    /// The domain could not be normalized into a queryable name.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

/// A configuration field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending configuration field
    pub field: &'static str,
    /// Human-readable explanation, including the accepted range or format
    pub message: String,
}

impl ConfigValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
