//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default HTTP method for webhook requests.
pub const METHOD: &str = "POST";

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 60;

/// Default per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default presence API endpoint.
pub const PRESENCE_URL: &str = "https://presence.roblox.com/v1/presence/users";

/// Default profile API endpoint (the account id is appended).
pub const PROFILE_URL: &str = "https://users.roblox.com/v1/users";

/// Whether a "watcher started" notification is sent by default.
pub const STARTUP_NOTICE: bool = true;

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}

/// Default request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
