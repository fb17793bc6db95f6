//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Watched account and upstream endpoints
    #[serde(default)]
    pub target: TargetSection,

    /// Webhook configuration section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,
}

/// Target configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    /// Account id to watch
    pub user_id: Option<u64>,

    /// Presence API endpoint
    pub presence_url: Option<String>,

    /// Profile API endpoint
    pub profile_url: Option<String>,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,

    /// HTTP method (default: POST)
    pub method: Option<String>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Bearer token for Authorization header
    pub bearer: Option<String>,

    /// Handlebars body template
    pub body_template: Option<String>,
}

/// Monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Polling interval in seconds
    pub poll_interval: Option<u64>,

    /// Per-request timeout in seconds
    pub request_timeout: Option<u64>,

    /// Send a notification when the watcher starts
    pub startup_notice: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# presence-watch configuration file

[target]
# Account id to watch (required)
# user_id = 1

# Presence API endpoint (POST {"userIds": [id]})
# presence_url = "https://presence.roblox.com/v1/presence/users"

# Profile API endpoint, the account id is appended as a path segment
# profile_url = "https://users.roblox.com/v1/users"

[webhook]
# Webhook URL (required)
# url = "https://discord.com/api/webhooks/..."

# HTTP method (default: POST)
# method = "POST"

# HTTP headers
# [webhook.headers]
# X-Custom-Header = "value"

# Bearer token for Authorization header
# bearer = "your-token-here"

# Handlebars body template replacing the default embed
# Available variables: {{title}}, {{description}}, {{timestamp}}, {{color}}, {{footer.text}},
# and {{#each fields}}{{name}} {{value}}{{/each}}
# Values are JSON-escaped; use triple braces for the raw text
# body_template = '{"content": "{{title}}: {{description}}"}'

[monitor]
# Polling interval in seconds (default: 60)
poll_interval = 60

# Per-request timeout in seconds (default: 15)
# request_timeout = 15

# Send a "watcher started" notification (default: true)
# startup_notice = true
"#
    .to_string()
}
