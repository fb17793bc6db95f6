//! Change event types produced by the detector.

use crate::fetcher::PresenceSnapshot;

/// The account's presence differs from the last observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceChange {
    /// Last known presence; `None` on the first observation.
    pub previous: Option<PresenceSnapshot>,
    /// Presence just observed.
    pub current: PresenceSnapshot,
}

impl PresenceChange {
    /// Returns true if this is the first presence ever observed.
    #[must_use]
    pub const fn is_first_observation(&self) -> bool {
        self.previous.is_none()
    }

    /// Returns true if only `place_id`/`last_location` moved while the status held.
    #[must_use]
    pub fn is_status_unchanged(&self) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|previous| previous.status == self.current.status)
    }
}

/// The account's "about" text differs from the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutChange {
    /// Text before the change.
    pub previous: String,
    /// Text after the change.
    pub current: String,
}

/// A change the scheduler forwards to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Presence changed (or was observed for the first time).
    Presence(PresenceChange),
    /// About text changed.
    About(AboutChange),
}

impl ChangeEvent {
    /// Short name of the event kind, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Presence(_) => "presence",
            Self::About(_) => "about",
        }
    }
}

impl From<PresenceChange> for ChangeEvent {
    fn from(change: PresenceChange) -> Self {
        Self::Presence(change)
    }
}

impl From<AboutChange> for ChangeEvent {
    fn from(change: AboutChange) -> Self {
        Self::About(change)
    }
}
