//! Tests for notification formatting.

use super::*;
use crate::fetcher::PresenceStatus;
use std::time::Duration;

fn profile() -> ProfileSnapshot {
    ProfileSnapshot::new("builder", "Bob", "")
}

fn at() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

mod startup {
    use super::*;

    #[test]
    fn carries_initial_presence() {
        let presence = PresenceSnapshot::new(PresenceStatus::InStudio);

        let notification = startup_notification(&profile(), &presence, at());

        assert_eq!(notification.title, "Watcher started for Bob (@builder)");
        assert_eq!(
            notification.description.as_deref(),
            Some("Initial presence: **In-Studio**")
        );
        assert_eq!(notification.color, Some(STARTUP_COLOR));
        assert_eq!(notification.timestamp, at());
    }
}

mod presence {
    use super::*;

    fn change(previous: Option<PresenceSnapshot>, current: PresenceSnapshot) -> PresenceChange {
        PresenceChange { previous, current }
    }

    #[test]
    fn lists_status_location_and_place() {
        let current = PresenceSnapshot::new(PresenceStatus::InGame)
            .with_place(1818)
            .with_location("Crossroads");

        let notification = presence_notification(&profile(), &change(None, current), at());

        assert_eq!(notification.title, "Bob (@builder)");
        assert_eq!(
            notification.description.as_deref(),
            Some(
                "**Presence**: In-Game\n**Location**: Crossroads\n\
                 [Open Place](https://www.roblox.com/games/1818)"
            )
        );
        assert_eq!(notification.color, Some(PRESENCE_COLOR));
        assert_eq!(notification.footer.as_deref(), Some(FOOTER));
    }

    #[test]
    fn omits_empty_location_and_zero_place() {
        let current = PresenceSnapshot::new(PresenceStatus::Online)
            .with_place(0)
            .with_location("");

        let notification = presence_notification(&profile(), &change(None, current), at());

        assert_eq!(
            notification.description.as_deref(),
            Some("**Presence**: Online")
        );
    }

    #[test]
    fn mentions_previous_status_when_it_changed() {
        let previous = PresenceSnapshot::new(PresenceStatus::Online);
        let current = PresenceSnapshot::new(PresenceStatus::Offline);

        let notification =
            presence_notification(&profile(), &change(Some(previous), current), at());

        assert_eq!(
            notification.description.as_deref(),
            Some("**Presence**: Offline\n**Previously**: Online")
        );
    }

    #[test]
    fn skips_previous_status_when_only_location_moved() {
        let previous = PresenceSnapshot::new(PresenceStatus::InGame).with_location("Lobby");
        let current = PresenceSnapshot::new(PresenceStatus::InGame).with_location("Arena");

        let notification =
            presence_notification(&profile(), &change(Some(previous), current), at());

        assert!(!notification.description.unwrap().contains("Previously"));
    }
}

mod about {
    use super::*;

    #[test]
    fn shows_old_and_new_fields() {
        let change = AboutChange {
            previous: "hello".to_string(),
            current: "goodbye".to_string(),
        };

        let notification = about_notification(&profile(), &change, at());

        assert_eq!(notification.title, "Bob (@builder) updated About");
        assert_eq!(
            notification.fields,
            vec![
                NotificationField::new("Old", "hello"),
                NotificationField::new("New", "goodbye"),
            ]
        );
        assert_eq!(notification.color, Some(ABOUT_COLOR));
    }

    #[test]
    fn blank_text_is_shown_as_placeholder() {
        let change = AboutChange {
            previous: "   ".to_string(),
            current: String::new(),
        };

        let notification = about_notification(&profile(), &change, at());

        assert_eq!(notification.fields[0].value, "_(empty)_");
        assert_eq!(notification.fields[1].value, "_(empty)_");
    }

    #[test]
    fn long_text_is_truncated_to_field_limit() {
        let change = AboutChange {
            previous: String::new(),
            current: "é".repeat(FIELD_VALUE_LIMIT + 10),
        };

        let notification = about_notification(&profile(), &change, at());

        let value = &notification.fields[1].value;
        assert_eq!(value.chars().count(), FIELD_VALUE_LIMIT);
        assert!(value.ends_with('…'));
    }
}

#[test]
fn change_notification_dispatches_on_kind() {
    let about = ChangeEvent::About(AboutChange {
        previous: "a".to_string(),
        current: "b".to_string(),
    });
    let presence = ChangeEvent::Presence(PresenceChange {
        previous: None,
        current: PresenceSnapshot::unknown(),
    });

    assert!(
        change_notification(&profile(), &about, at())
            .title
            .ends_with("updated About")
    );
    assert_eq!(
        change_notification(&profile(), &presence, at()).title,
        "Bob (@builder)"
    );
}

#[test]
fn short_text_is_not_truncated() {
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello!", 5), "hell…");
}
