//! Notifier trait and its HTTP webhook implementation.

use handlebars::Handlebars;
use serde::Serialize;

use super::{Notification, NotificationField, WebhookError};
use crate::time::format_rfc3339;
use crate::transport::{HttpClient, HttpRequest};

/// Longest response body excerpt kept in a [`WebhookError::NonSuccessStatus`].
const BODY_EXCERPT_CHARS: usize = 200;

/// Trait for delivering notifications to an external sink.
///
/// Delivery is attempted once. Implementations report failures but never
/// retry; callers log the error and continue.
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] if the notification could not be delivered.
    fn notify(
        &self,
        notification: &Notification,
    ) -> impl std::future::Future<Output = Result<(), WebhookError>> + Send;
}

/// HTTP webhook notifier.
///
/// Without a body template the notification is posted as a Discord-style
/// embed: `{"embeds": [{title, description, fields, timestamp, color, footer}]}`.
///
/// # Template Support
///
/// A Handlebars body template replaces the embed. Available variables:
/// - `title`, `description`, `footer`: strings (`description`/`footer` may be missing)
/// - `fields`: array of `{name, value, inline}`
/// - `timestamp`: RFC 3339 string
/// - `color`: number
///
/// `{{var}}` escapes for embedding inside a JSON string literal; use
/// `{{{var}}}` for the raw value.
///
/// # Example
///
/// ```
/// use presence_watch::transport::ReqwestClient;
/// use presence_watch::webhook::HttpNotifier;
/// use std::time::Duration;
/// use url::Url;
///
/// let notifier = HttpNotifier::new(
///     ReqwestClient::with_timeout(Duration::from_secs(15)).unwrap(),
///     Url::parse("https://discord.com/api/webhooks/1/token").unwrap(),
/// );
/// ```
#[derive(Debug)]
pub struct HttpNotifier<H> {
    client: H,
    url: url::Url,
    method: http::Method,
    headers: http::HeaderMap,
    body_template: Option<String>,
}

impl<H> HttpNotifier<H> {
    /// Creates a notifier that POSTs embeds to `url`.
    #[must_use]
    pub fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            url,
            method: http::Method::POST,
            headers: http::HeaderMap::new(),
            body_template: None,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Sets extra HTTP headers.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the body template (Handlebars syntax).
    #[must_use]
    pub fn with_body_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = Some(template.into());
        self
    }

    /// Returns the configured URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Returns the configured HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }
}

/// Serialized form of a notification, shared by the embed and the template.
#[derive(Serialize)]
struct EmbedData<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldData<'a>>,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<FooterData<'a>>,
}

#[derive(Serialize)]
struct FieldData<'a> {
    name: &'a str,
    value: &'a str,
    inline: bool,
}

#[derive(Serialize)]
struct FooterData<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    embeds: [EmbedData<'a>; 1],
}

impl<'a> From<&'a NotificationField> for FieldData<'a> {
    fn from(field: &'a NotificationField) -> Self {
        Self {
            name: &field.name,
            value: &field.value,
            inline: field.inline,
        }
    }
}

impl<'a> From<&'a Notification> for EmbedData<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            title: &notification.title,
            description: notification.description.as_deref(),
            fields: notification.fields.iter().map(FieldData::from).collect(),
            timestamp: format_rfc3339(notification.timestamp),
            color: notification.color,
            footer: notification
                .footer
                .as_deref()
                .map(|text| FooterData { text }),
        }
    }
}

/// Escapes a value for use inside a JSON string literal.
fn json_string_escape(value: &str) -> String {
    serde_json::to_string(value).map_or_else(
        |_| value.to_owned(),
        |quoted| quoted[1..quoted.len() - 1].to_owned(),
    )
}

/// Renders `template` against a notification.
///
/// # Errors
///
/// Returns [`WebhookError::Template`] if rendering fails.
pub fn render_template(template: &str, notification: &Notification) -> Result<String, WebhookError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(json_string_escape);
    handlebars
        .render_template(template, &EmbedData::from(notification))
        .map_err(|e| WebhookError::Template(e.to_string()))
}

impl<H: HttpClient> HttpNotifier<H> {
    /// Builds the HTTP request for a notification.
    fn build_request(&self, notification: &Notification) -> Result<HttpRequest, WebhookError> {
        let mut request = HttpRequest::new(self.method.clone(), self.url.clone());

        if let Some(template) = &self.body_template {
            request = request.with_body(render_template(template, notification)?.into_bytes());
        } else {
            let payload = WebhookPayload {
                embeds: [EmbedData::from(notification)],
            };
            request = request
                .with_json(&payload)
                .map_err(WebhookError::Serialize)?;
        }

        // Configured headers override the default content type.
        for (name, value) in &self.headers {
            request.headers.insert(name, value.clone());
        }

        Ok(request)
    }
}

impl<H: HttpClient> Notifier for HttpNotifier<H> {
    async fn notify(&self, notification: &Notification) -> Result<(), WebhookError> {
        let request = self.build_request(notification)?;
        let response = self.client.request(request).await?;

        if response.is_success() {
            return Ok(());
        }

        Err(WebhookError::NonSuccessStatus {
            status: response.status,
            body: response.body_excerpt(BODY_EXCERPT_CHARS),
        })
    }
}

/// Notifier that only logs, used in dry-run mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), WebhookError> {
        tracing::info!(
            "Dry-run: would send \"{title}\" ({fields} field(s))",
            title = notification.title,
            fields = notification.fields.len(),
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "sender_tests.rs"]
mod tests;
