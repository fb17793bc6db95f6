//! Change Detector: decides whether a fresh snapshot is news or noise.
//!
//! This module provides:
//! - The state held between cycles ([`WatcherState`])
//! - Change events ([`ChangeEvent`], [`PresenceChange`], [`AboutChange`])
//! - The comparison functions ([`detect_presence_change`], [`detect_about_change`], [`detect`])
//!
//! Presence is reported on its first observation so the watcher announces
//! itself; the about text is not, so startup never looks like an edit.

mod change;
mod detect;
mod state;

pub use change::{AboutChange, ChangeEvent, PresenceChange};
pub use detect::{detect, detect_about_change, detect_presence_change};
pub use state::WatcherState;
