//! Error handling.
//!
//! Errors are split into two tiers:
//! - **Transport errors** ([`ResolveError`]): network failures, non-2xx
//!   responses and malformed upstream JSON. They propagate to the caller.
//! - **Caller errors** ([`CheckError`]): an unrecognized DKIM provider tag or
//!   a domain that cannot be queried, plus any wrapped transport error.
//!
//! Record validation failures are ordinary results, not errors.

mod types;

// Re-export public API
pub use types::{CheckError, ConfigValidationError, InitializationError, ResolveError};
