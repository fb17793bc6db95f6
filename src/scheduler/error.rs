//! Per-cycle error type.

use thiserror::Error;

use crate::fetcher::FetchError;

/// Why a poll cycle ended early.
///
/// The variants only differ in how they are logged; the scheduler treats
/// both as retryable on the next interval.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Network failure or non-2xx response from the upstream API.
    #[error("HTTP error: {0}")]
    Transport(#[source] FetchError),

    /// Anything else, such as an undecodable response.
    #[error("Loop error: {0}")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CycleError {
    /// Returns true for transport failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<FetchError> for CycleError {
    fn from(error: FetchError) -> Self {
        if error.is_transport() {
            Self::Transport(error)
        } else {
            Self::Unexpected(Box::new(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpError;

    #[test]
    fn transport_fetch_errors_classify_as_transport() {
        let error: CycleError = FetchError::Http {
            endpoint: "presence API",
            source: HttpError::Timeout,
        }
        .into();

        assert!(error.is_transport());
        assert!(error.to_string().starts_with("HTTP error:"));
    }

    #[test]
    fn decode_errors_classify_as_unexpected() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let error: CycleError = FetchError::Decode {
            endpoint: "profile API",
            source,
        }
        .into();

        assert!(!error.is_transport());
        assert!(error.to_string().starts_with("Loop error:"));
    }
}
