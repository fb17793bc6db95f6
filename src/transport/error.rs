//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP transport failures.
///
/// Covers failures before a response is received. A response with a non-2xx
/// status is not an `HttpError`; callers inspect the status themselves.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed (DNS, refused, reset, TLS).
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
