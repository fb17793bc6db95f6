//! Snapshot types describing the watched account's observable state.

use std::fmt;

/// Identifier of the watched account on the upstream API.
pub type EntityId = u64;

/// Semantic category of an account's presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceStatus {
    /// Not connected.
    Offline,
    /// Connected, not in an experience.
    Online,
    /// Playing inside a place.
    InGame,
    /// Editing in the studio tool.
    InStudio,
    /// Unrecognized or missing presence code.
    Unknown,
}

impl PresenceStatus {
    /// Maps the upstream numeric presence code to a status.
    ///
    /// Codes outside `0..=3`, and a missing code, map to [`Self::Unknown`].
    #[must_use]
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Offline,
            Some(1) => Self::Online,
            Some(2) => Self::InGame,
            Some(3) => Self::InStudio,
            _ => Self::Unknown,
        }
    }

    /// Returns the human-readable label used in notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
            Self::InGame => "In-Game",
            Self::InStudio => "In-Studio",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Presence of the account at one point in time.
///
/// `place_id` and `last_location` are reported independently by the API;
/// neither implies the other, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresenceSnapshot {
    /// Presence category.
    pub status: PresenceStatus,
    /// Place the account is in, when reported.
    pub place_id: Option<u64>,
    /// Free-text location label, when reported.
    pub last_location: Option<String>,
}

impl PresenceSnapshot {
    /// Creates a snapshot with the given status and no place or location.
    #[must_use]
    pub const fn new(status: PresenceStatus) -> Self {
        Self {
            status,
            place_id: None,
            last_location: None,
        }
    }

    /// Snapshot used when the API returns no record for the account.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(PresenceStatus::Unknown)
    }

    /// Sets the place identifier.
    #[must_use]
    pub const fn with_place(mut self, place_id: u64) -> Self {
        self.place_id = Some(place_id);
        self
    }

    /// Sets the location label.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.last_location = Some(location.into());
        self
    }
}

/// Profile of the account at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileSnapshot {
    /// Unique account name (`@name`).
    pub account_name: String,
    /// Display name.
    pub display_name: String,
    /// Free-text "about" field; empty when the account has none.
    pub about_text: String,
}

impl ProfileSnapshot {
    /// Creates a profile snapshot.
    #[must_use]
    pub fn new(
        account_name: impl Into<String>,
        display_name: impl Into<String>,
        about_text: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            display_name: display_name.into(),
            about_text: about_text.into(),
        }
    }

    /// Label used in notification titles: `Display (@account)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} (@{})", self.display_name, self.account_name)
    }
}
