//! Comparison of fresh snapshots against [`WatcherState`].

use super::{AboutChange, ChangeEvent, PresenceChange, WatcherState};
use crate::fetcher::PresenceSnapshot;

/// Compares `current` against the last known presence.
///
/// Returns a change when there is no previous presence, or when the status,
/// place id or location differ. Optional fields compare as values, so
/// `None == None` and `None != Some(_)`. On a change the state is updated to
/// `current`; otherwise it is left untouched.
///
/// The first observation is reported as a change.
pub fn detect_presence_change(
    current: &PresenceSnapshot,
    state: &mut WatcherState,
) -> Option<PresenceChange> {
    if state
        .last_presence
        .as_ref()
        .is_some_and(|last| presence_equal(last, current))
    {
        return None;
    }

    let previous = state.last_presence.replace(current.clone());
    Some(PresenceChange {
        previous,
        current: current.clone(),
    })
}

/// Compares `current` against the about-text baseline.
///
/// The first observation only records the baseline and returns `None`. After
/// that a change is returned whenever the text differs byte for byte, and the
/// baseline moves to `current`. Equal text leaves the state untouched.
pub fn detect_about_change(current: &str, state: &mut WatcherState) -> Option<AboutChange> {
    let Some(previous) = state.last_about_text.as_deref() else {
        state.last_about_text = Some(current.to_owned());
        return None;
    };

    if previous == current {
        return None;
    }

    let previous = state.last_about_text.replace(current.to_owned())?;
    Some(AboutChange {
        previous,
        current: current.to_owned(),
    })
}

/// Runs both detectors, presence first, and collects the resulting events.
pub fn detect(
    presence: &PresenceSnapshot,
    about_text: &str,
    state: &mut WatcherState,
) -> Vec<ChangeEvent> {
    let presence_change = detect_presence_change(presence, state).map(ChangeEvent::from);
    let about_change = detect_about_change(about_text, state).map(ChangeEvent::from);

    presence_change.into_iter().chain(about_change).collect()
}

/// Field-by-field equality of two presence snapshots.
fn presence_equal(a: &PresenceSnapshot, b: &PresenceSnapshot) -> bool {
    a.status == b.status && a.place_id == b.place_id && a.last_location == b.last_location
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
