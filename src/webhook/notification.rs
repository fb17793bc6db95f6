//! Notification value type and the formatting of change events into it.

use std::time::SystemTime;

use crate::detector::{AboutChange, ChangeEvent, PresenceChange};
use crate::fetcher::{PresenceSnapshot, ProfileSnapshot};

/// Embed colour of presence notifications.
pub const PRESENCE_COLOR: u32 = 5_814_783;

/// Embed colour of about-text notifications.
pub const ABOUT_COLOR: u32 = 15_105_570;

/// Embed colour of the startup notification.
pub const STARTUP_COLOR: u32 = 3_447_003;

/// Footer text of change notifications.
pub const FOOTER: &str = "Presence Watcher";

/// Base URL of place pages; the place id is appended.
pub const PLACE_URL_BASE: &str = "https://www.roblox.com/games/";

/// Longest field value the webhook target accepts.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Placeholder shown for blank about text.
const EMPTY_TEXT: &str = "_(empty)_";

/// One named value shown under a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationField {
    /// Field label.
    pub name: String,
    /// Field content.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

impl NotificationField {
    /// Creates a full-width field, truncating `value` to [`FIELD_VALUE_LIMIT`].
    #[must_use]
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        Self {
            name: name.into(),
            value: truncate(value, FIELD_VALUE_LIMIT),
            inline: false,
        }
    }
}

/// A structured message for the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Headline.
    pub title: String,
    /// Body text (Markdown).
    pub description: Option<String>,
    /// Additional named values.
    pub fields: Vec<NotificationField>,
    /// When the event was detected.
    pub timestamp: SystemTime,
    /// Accent colour as `0xRRGGBB`.
    pub color: Option<u32>,
    /// Small trailing text.
    pub footer: Option<String>,
}

impl Notification {
    /// Creates a notification with only a title and timestamp.
    #[must_use]
    pub fn new(title: impl Into<String>, timestamp: SystemTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            timestamp,
            color: None,
            footer: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: NotificationField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the accent colour.
    #[must_use]
    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Builds the "watcher started" notification carrying the initial presence.
#[must_use]
pub fn startup_notification(
    profile: &ProfileSnapshot,
    presence: &PresenceSnapshot,
    timestamp: SystemTime,
) -> Notification {
    Notification::new(format!("Watcher started for {}", profile.label()), timestamp)
        .with_description(format!("Initial presence: **{}**", presence.status))
        .with_color(STARTUP_COLOR)
}

/// Builds the notification for a presence change.
#[must_use]
pub fn presence_notification(
    profile: &ProfileSnapshot,
    change: &PresenceChange,
    timestamp: SystemTime,
) -> Notification {
    let current = &change.current;
    let mut lines = vec![format!("**Presence**: {}", current.status)];

    if let Some(location) = current.last_location.as_deref().filter(|l| !l.is_empty()) {
        lines.push(format!("**Location**: {location}"));
    }
    if let Some(place) = current.place_id.filter(|id| *id != 0) {
        lines.push(format!("[Open Place]({PLACE_URL_BASE}{place})"));
    }
    if let Some(previous) = change
        .previous
        .as_ref()
        .filter(|previous| previous.status != current.status)
    {
        lines.push(format!("**Previously**: {}", previous.status));
    }

    Notification::new(profile.label(), timestamp)
        .with_description(lines.join("\n"))
        .with_color(PRESENCE_COLOR)
        .with_footer(FOOTER)
}

/// Builds the notification for an about-text change.
#[must_use]
pub fn about_notification(
    profile: &ProfileSnapshot,
    change: &AboutChange,
    timestamp: SystemTime,
) -> Notification {
    Notification::new(format!("{} updated About", profile.label()), timestamp)
        .with_field(NotificationField::new("Old", display_text(&change.previous)))
        .with_field(NotificationField::new("New", display_text(&change.current)))
        .with_color(ABOUT_COLOR)
        .with_footer(FOOTER)
}

/// Builds the notification for any change event.
#[must_use]
pub fn change_notification(
    profile: &ProfileSnapshot,
    event: &ChangeEvent,
    timestamp: SystemTime,
) -> Notification {
    match event {
        ChangeEvent::Presence(change) => presence_notification(profile, change, timestamp),
        ChangeEvent::About(change) => about_notification(profile, change, timestamp),
    }
}

fn display_text(text: &str) -> &str {
    if text.trim().is_empty() {
        EMPTY_TEXT
    } else {
        text
    }
}

/// Truncates to at most `limit` characters, marking the cut with an ellipsis.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
