//! Core error types for billing forms.
//!
//! Lookup errors are transport-agnostic. HTTP (or any other transport)
//! failures are converted to [`LookupError`] by the client layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for billing form operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Billing ID lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Local (no network) validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value does not have the `######-###` shape.
    #[error("Malformed billing ID '{0}': expected six digits, a hyphen, then three digits (e.g., 123456-789)")]
    MalformedBillingId(String),
}

/// Failures talking to the remote validation endpoint.
///
/// These are distinct from a successful answer of "not valid": a lookup
/// error means the validity is unknown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The request could not be sent or the connection dropped.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint did not answer in time.
    #[error("Lookup timed out")]
    Timeout,

    /// The endpoint answered with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// The response body was not the expected shape.
    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Decode(err.to_string())
    }
}
