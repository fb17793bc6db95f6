//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use presence_watch::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0), only reachable through `init`.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - the watcher could not be started.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns true if `error` is one the generated template helps with.
pub fn suggests_init(error: &ConfigError) -> bool {
    match error {
        ConfigError::MissingRequired { field: f, .. } => *f == field::URL || *f == field::USER_ID,
        ConfigError::FileRead { .. } => true,
        _ => false,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if suggests_init(error) {
        eprintln!("\nRun 'presence-watch init' to generate a configuration template.");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_suggest_init() {
        assert!(suggests_init(&ConfigError::missing(field::URL, "")));
        assert!(suggests_init(&ConfigError::missing(field::USER_ID, "")));
    }

    #[test]
    fn value_errors_do_not_suggest_init() {
        assert!(!suggests_init(&ConfigError::InvalidUserId(0)));
        assert!(!suggests_init(&ConfigError::InvalidMethod("X Y".to_string())));
    }

    #[test]
    fn runtime_error_is_distinct_from_config_error() {
        assert_ne!(exit_code::runtime_error(), exit_code::CONFIG_ERROR);
        assert_ne!(exit_code::runtime_error(), exit_code::SUCCESS);
    }
}
