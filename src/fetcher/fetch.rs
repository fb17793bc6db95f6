//! State fetching trait and error types.

use thiserror::Error;

use super::{EntityId, PresenceSnapshot, ProfileSnapshot};
use crate::transport::{HttpError, body_suffix};

/// Error type for upstream API calls.
///
/// [`FetchError::is_transport`] separates network/HTTP failures from
/// responses that could not be understood. Both are retryable from the
/// scheduler's point of view.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("{endpoint} request failed: {source}")]
    Http {
        /// Which API was called.
        endpoint: &'static str,
        /// Underlying transport error.
        #[source]
        source: HttpError,
    },

    /// The API answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}{}", body_suffix(.body.as_deref()))]
    Status {
        /// Which API was called.
        endpoint: &'static str,
        /// Response status.
        status: http::StatusCode,
        /// Beginning of the response body, if it was text.
        body: Option<String>,
    },

    /// The request body could not be encoded.
    #[error("Failed to encode {endpoint} request: {source}")]
    Encode {
        /// Which API was called.
        endpoint: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The response body did not have the expected shape.
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        /// Which API was called.
        endpoint: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Returns true for network failures and non-2xx responses.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Status { .. })
    }
}

/// Trait for reading the watched account's state from the upstream API.
///
/// The two calls are independent; the scheduler issues both every cycle.
///
/// # Example
///
/// ```ignore
/// use presence_watch::fetcher::{StateFetcher, FetchError, PresenceSnapshot, ProfileSnapshot};
///
/// struct Fixed;
///
/// impl StateFetcher for Fixed {
///     async fn fetch_presence(&self, _id: u64) -> Result<PresenceSnapshot, FetchError> {
///         Ok(PresenceSnapshot::unknown())
///     }
///     async fn fetch_profile(&self, _id: u64) -> Result<ProfileSnapshot, FetchError> {
///         Ok(ProfileSnapshot::default())
///     }
/// }
/// ```
pub trait StateFetcher: Send + Sync {
    /// Fetches the account's current presence.
    ///
    /// A response without a record for `id` yields
    /// [`PresenceSnapshot::unknown`], not an error.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    fn fetch_presence(
        &self,
        id: EntityId,
    ) -> impl std::future::Future<Output = Result<PresenceSnapshot, FetchError>> + Send;

    /// Fetches the account's current profile.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    fn fetch_profile(
        &self,
        id: EntityId,
    ) -> impl std::future::Future<Output = Result<ProfileSnapshot, FetchError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn http_and_status_are_transport_errors() {
        let transport = FetchError::Http {
            endpoint: "presence API",
            source: HttpError::Timeout,
        };
        let status = FetchError::Status {
            endpoint: "profile API",
            status: http::StatusCode::TOO_MANY_REQUESTS,
            body: None,
        };

        assert!(transport.is_transport());
        assert!(status.is_transport());
    }

    #[test]
    fn decode_is_not_a_transport_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = FetchError::Decode {
            endpoint: "profile API",
            source,
        };

        assert!(!error.is_transport());
        assert!(error.to_string().contains("Failed to decode profile API"));
    }

    #[test]
    fn status_error_displays_endpoint_code_and_body() {
        let error = FetchError::Status {
            endpoint: "presence API",
            status: http::StatusCode::SERVICE_UNAVAILABLE,
            body: Some("down".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "presence API returned HTTP 503 Service Unavailable: down"
        );
    }

    #[test]
    fn http_error_preserves_source_chain() {
        let error = FetchError::Http {
            endpoint: "presence API",
            source: HttpError::Timeout,
        };

        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "Request timed out");
    }
}
