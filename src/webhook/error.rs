//! Error types for webhook delivery.

use thiserror::Error;

use crate::transport::{HttpError, body_suffix};

/// Error type for a single notification delivery.
///
/// Deliveries are attempted once; the scheduler logs these and moves on.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request could not be completed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The webhook answered with a non-2xx status.
    #[error("Webhook returned HTTP {status}{}", body_suffix(.body.as_deref()))]
    NonSuccessStatus {
        /// Response status.
        status: http::StatusCode,
        /// Beginning of the response body, if it was text.
        body: Option<String>,
    },

    /// The body template failed to render.
    #[error("Template rendering failed: {0}")]
    Template(String),

    /// The default JSON body could not be encoded.
    #[error("Failed to encode webhook body: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_converts() {
        let error: WebhookError = HttpError::Timeout.into();
        assert!(matches!(error, WebhookError::Http(HttpError::Timeout)));
        assert_eq!(error.to_string(), "HTTP error: Request timed out");
    }

    #[test]
    fn non_success_status_displays_code_and_body() {
        let error = WebhookError::NonSuccessStatus {
            status: http::StatusCode::BAD_REQUEST,
            body: Some("Invalid Form Body: embeds.0.title".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Webhook returned HTTP 400 Bad Request: Invalid Form Body: embeds.0.title"
        );
    }

    #[test]
    fn non_success_status_without_body() {
        let error = WebhookError::NonSuccessStatus {
            status: http::StatusCode::TOO_MANY_REQUESTS,
            body: None,
        };
        assert_eq!(error.to_string(), "Webhook returned HTTP 429 Too Many Requests");
    }
}
