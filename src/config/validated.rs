//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use handlebars::Handlebars;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use url::Url;

use crate::fetcher::{ApiEndpoints, EntityId};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Account being watched (required)
    pub user_id: EntityId,

    /// Webhook URL (required)
    pub webhook_url: Url,

    /// HTTP method for webhook requests
    pub method: Method,

    /// HTTP headers for webhook requests
    pub headers: HeaderMap,

    /// Handlebars body template (optional)
    pub body_template: Option<String>,

    /// Upstream presence and profile endpoints
    pub endpoints: ApiEndpoints,

    /// Delay between the end of one cycle and the start of the next
    pub poll_interval: Duration,

    /// Timeout applied to every outbound request
    pub request_timeout: Duration,

    /// Whether a "watcher started" notification is sent
    pub startup_notice: bool,

    /// Dry-run mode (log notifications without sending them)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ user_id: {}, url: {}, method: {}, poll_interval: {}s, \
             request_timeout: {}s, startup_notice: {}, dry_run: {}, headers: {} }}",
            self.user_id,
            redact_url(&self.webhook_url),
            self.method,
            self.poll_interval.as_secs(),
            self.request_timeout.as_secs(),
            self.startup_notice,
            self.dry_run,
            self.headers.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`user_id`, `url`)
    /// - A URL is invalid
    /// - Duration values are zero
    /// - Header format is invalid
    /// - The body template does not compile
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let user_id = Self::resolve_user_id(cli, toml)?;
        let webhook_url = Self::resolve_webhook_url(cli, toml)?;
        let method = Self::resolve_method(cli, toml)?;
        let headers = Self::resolve_headers(cli, toml)?;
        let body_template = Self::resolve_body_template(cli, toml)?;
        let endpoints = Self::resolve_endpoints(cli, toml)?;

        let poll_interval = resolve_seconds(
            field::POLL_INTERVAL,
            cli.poll_interval
                .or_else(|| toml.and_then(|t| t.monitor.poll_interval)),
            defaults::POLL_INTERVAL_SECS,
        )?;

        let request_timeout = resolve_seconds(
            field::REQUEST_TIMEOUT,
            cli.request_timeout
                .or_else(|| toml.and_then(|t| t.monitor.request_timeout)),
            defaults::REQUEST_TIMEOUT_SECS,
        )?;

        // The CLI flag can only disable the notice.
        let startup_notice = !cli.no_startup_notice
            && toml
                .and_then(|t| t.monitor.startup_notice)
                .unwrap_or(defaults::STARTUP_NOTICE);

        Ok(Self {
            user_id,
            webhook_url,
            method,
            headers,
            body_template,
            endpoints,
            poll_interval,
            request_timeout,
            startup_notice,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_user_id(cli: &Cli, toml: Option<&TomlConfig>) -> Result<EntityId, ConfigError> {
        let user_id = cli
            .user_id
            .or_else(|| toml.and_then(|t| t.target.user_id))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::USER_ID,
                    "Use --user-id, WATCH_USER_ID or set target.user_id in config file",
                )
            })?;

        if user_id == 0 {
            return Err(ConfigError::InvalidUserId(user_id));
        }

        Ok(user_id)
    }

    fn resolve_webhook_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::URL,
                    "Use --url, WATCH_WEBHOOK_URL or set webhook.url in config file",
                )
            })?;

        parse_url(field::URL, url_str)
    }

    fn resolve_endpoints(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ApiEndpoints, ConfigError> {
        let presence = cli
            .presence_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.target.presence_url.as_deref()))
            .unwrap_or(defaults::PRESENCE_URL);

        let profile = cli
            .profile_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.target.profile_url.as_deref()))
            .unwrap_or(defaults::PROFILE_URL);

        Ok(ApiEndpoints::new(
            parse_url(field::PRESENCE_URL, presence)?,
            parse_url(field::PROFILE_URL, profile)?,
        ))
    }

    fn resolve_method(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Method, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let method_str = cli
            .method
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.method.as_deref()))
            .unwrap_or(defaults::METHOD);

        method_str
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // TOML first so CLI headers override
        if let Some(toml) = toml {
            for (name, value) in &toml.webhook.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        let bearer = cli
            .bearer
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.bearer.as_deref()));

        if let Some(token) = bearer {
            let auth_value = format!("Bearer {token}");
            let header_value = parse_header_value("Authorization", &auth_value)?;
            headers.insert(AUTHORIZATION, header_value);
        }

        Ok(headers)
    }

    fn resolve_body_template(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let template = cli
            .body_template
            .clone()
            .or_else(|| toml.and_then(|t| t.webhook.body_template.clone()));

        if let Some(ref tmpl) = template {
            Self::validate_template(tmpl)?;
        }

        Ok(template)
    }

    fn validate_template(template: &str) -> Result<(), ConfigError> {
        let hbs = Handlebars::new();
        // Syntax check only; missing variables render empty
        hbs.render_template(template, &serde_json::json!({}))
            .map_err(|e| ConfigError::InvalidTemplate {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Keeps scheme, host and port; webhook paths often embed the token.
fn redact_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let port = url.port().map_or_else(String::new, |port| format!(":{port}"));
    format!("{}://{host}{port}/…", url.scheme())
}

fn resolve_seconds(
    field: &'static str,
    value: Option<u64>,
    default: u64,
) -> Result<Duration, ConfigError> {
    let seconds = value.unwrap_or(default);

    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        url: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            url: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
