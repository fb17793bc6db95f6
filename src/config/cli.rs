//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// presence-watch: account presence and profile watcher
///
/// Polls an account's presence and "about" text and notifies a webhook
/// whenever either changes.
#[derive(Debug, Parser)]
#[command(name = "presence-watch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Account id to watch (required for run mode)
    #[arg(long = "user-id", env = "WATCH_USER_ID")]
    pub user_id: Option<u64>,

    /// Webhook URL (required for run mode)
    #[arg(long, env = "WATCH_WEBHOOK_URL")]
    pub url: Option<String>,

    /// Polling interval in seconds
    #[arg(long = "poll-interval", env = "WATCH_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long = "request-timeout")]
    pub request_timeout: Option<u64>,

    /// Presence API endpoint
    #[arg(long = "presence-url")]
    pub presence_url: Option<String>,

    /// Profile API endpoint (the account id is appended)
    #[arg(long = "profile-url")]
    pub profile_url: Option<String>,

    /// HTTP method for webhook requests
    #[arg(long)]
    pub method: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Bearer token for Authorization header
    #[arg(long)]
    pub bearer: Option<String>,

    /// Handlebars body template replacing the default embed
    #[arg(long = "body-template")]
    pub body_template: Option<String>,

    /// Do not send the "watcher started" notification
    #[arg(long = "no-startup-notice")]
    pub no_startup_notice: bool,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Test mode - log notifications without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for presence-watch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "presence-watch.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
