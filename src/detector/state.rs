//! The watcher's in-memory state.

use crate::fetcher::PresenceSnapshot;

/// Last observed values, held across poll cycles.
///
/// Both fields are `None` until the first successful observation. After
/// that `last_about_text` is always `Some`, possibly holding an empty string.
/// Nothing is persisted; a restart begins from [`WatcherState::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatcherState {
    pub(super) last_presence: Option<PresenceSnapshot>,
    pub(super) last_about_text: Option<String>,
}

impl WatcherState {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_presence: None,
            last_about_text: None,
        }
    }

    /// Last observed presence.
    #[must_use]
    pub const fn last_presence(&self) -> Option<&PresenceSnapshot> {
        self.last_presence.as_ref()
    }

    /// Current about-text baseline.
    #[must_use]
    pub fn last_about_text(&self) -> Option<&str> {
        self.last_about_text.as_deref()
    }

    /// Returns true once both fields have been observed.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.last_presence.is_some() && self.last_about_text.is_some()
    }
}
