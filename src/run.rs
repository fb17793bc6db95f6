//! Application execution logic.
//!
//! Wires the validated configuration into a [`Watcher`] and runs it.

use std::convert::Infallible;

use thiserror::Error;

use presence_watch::config::ValidatedConfig;
use presence_watch::fetcher::HttpStateFetcher;
use presence_watch::scheduler::Watcher;
use presence_watch::transport::ReqwestClient;
use presence_watch::webhook::{HttpNotifier, LogNotifier, Notification, Notifier, WebhookError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for startup failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Notifier selected by the `dry_run` option.
#[derive(Debug)]
enum AppNotifier {
    Http(HttpNotifier<ReqwestClient>),
    DryRun(LogNotifier),
}

impl Notifier for AppNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), WebhookError> {
        match self {
            Self::Http(notifier) => notifier.notify(notification).await,
            Self::DryRun(notifier) => notifier.notify(notification).await,
        }
    }
}

/// Executes the watcher.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built; once the
/// watcher starts it never returns.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<Infallible, RunError> {
    let client = ReqwestClient::with_timeout(config.request_timeout).map_err(RunError::HttpClient)?;

    let notifier = create_notifier(&config, client.clone());
    let fetcher = HttpStateFetcher::new(client, config.endpoints.clone());

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - notifications will be logged but not sent");
    }

    let watcher = Watcher::new(fetcher, notifier, config.user_id, config.poll_interval)
        .with_startup_notice(config.startup_notice);

    Ok(watcher.run().await)
}

/// Creates the notifier from configuration.
fn create_notifier(config: &ValidatedConfig, client: ReqwestClient) -> AppNotifier {
    if config.dry_run {
        return AppNotifier::DryRun(LogNotifier);
    }

    let mut notifier = HttpNotifier::new(client, config.webhook_url.clone())
        .with_method(config.method.clone())
        .with_headers(config.headers.clone());

    if let Some(ref template) = config.body_template {
        notifier = notifier.with_body_template(template);
    }

    AppNotifier::Http(notifier)
}
