//! The poll loop: fetch, detect, notify, sleep.

use std::convert::Infallible;
use std::fmt::Write as _;
use std::time::Duration;

use super::CycleError;
use crate::detector::{ChangeEvent, WatcherState, detect};
use crate::fetcher::{EntityId, PresenceSnapshot, ProfileSnapshot, StateFetcher};
use crate::time::{Clock, Sleeper, SystemClock, TokioSleeper};
use crate::webhook::{Notification, Notifier, change_notification, startup_notification};

/// Result of one successful cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Changes detected this cycle, in notification order.
    pub events: Vec<ChangeEvent>,
    /// Notifications the notifier accepted.
    pub delivered: usize,
    /// Notifications the notifier rejected or could not send.
    pub failed: usize,
}

impl CycleReport {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty()
    }
}

/// Watches one account and notifies on every change.
///
/// Owns the [`WatcherState`]; nothing else reads or writes it. Cycles run
/// strictly one after another and every cycle is followed by a full sleep,
/// whether it succeeded or not.
///
/// # Type Parameters
///
/// - `F`: the [`StateFetcher`] for the upstream API
/// - `N`: the [`Notifier`] receiving change notifications
/// - `C`: the [`Clock`] stamping notifications (defaults to [`SystemClock`])
/// - `S`: the [`Sleeper`] between cycles (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct Watcher<F, N, C = SystemClock, S = TokioSleeper> {
    fetcher: F,
    notifier: N,
    clock: C,
    sleeper: S,
    entity_id: EntityId,
    interval: Duration,
    startup_notice: bool,
    state: WatcherState,
}

impl<F, N> Watcher<F, N> {
    /// Creates a watcher polling `entity_id` every `interval`.
    ///
    /// The startup notice is enabled; the state starts empty.
    #[must_use]
    pub const fn new(fetcher: F, notifier: N, entity_id: EntityId, interval: Duration) -> Self {
        Self {
            fetcher,
            notifier,
            clock: SystemClock,
            sleeper: TokioSleeper,
            entity_id,
            interval,
            startup_notice: true,
            state: WatcherState::new(),
        }
    }
}

impl<F, N, C, S> Watcher<F, N, C, S> {
    /// Replaces the clock.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Watcher<F, N, C2, S> {
        Watcher {
            fetcher: self.fetcher,
            notifier: self.notifier,
            clock,
            sleeper: self.sleeper,
            entity_id: self.entity_id,
            interval: self.interval,
            startup_notice: self.startup_notice,
            state: self.state,
        }
    }

    /// Replaces the sleeper.
    ///
    /// Useful for testing to avoid real delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Watcher<F, N, C, S2> {
        Watcher {
            fetcher: self.fetcher,
            notifier: self.notifier,
            clock: self.clock,
            sleeper,
            entity_id: self.entity_id,
            interval: self.interval,
            startup_notice: self.startup_notice,
            state: self.state,
        }
    }

    /// Enables or disables the "watcher started" notification.
    #[must_use]
    pub const fn with_startup_notice(mut self, enabled: bool) -> Self {
        self.startup_notice = enabled;
        self
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &WatcherState {
        &self.state
    }
}

impl<F, N, C, S> Watcher<F, N, C, S>
where
    F: StateFetcher,
    N: Notifier,
    C: Clock,
    S: Sleeper,
{
    /// Runs forever: one bootstrap, then a cycle and a sleep per interval.
    pub async fn run(mut self) -> Infallible {
        tracing::info!(
            "Watching account {} every {}s",
            self.entity_id,
            self.interval.as_secs()
        );

        if let Err(e) = self.bootstrap().await {
            tracing::error!("Init error: {e}");
        }

        loop {
            // Outcome is already logged by `tick`.
            let _ = self.tick().await;
        }
    }

    /// Establishes the initial state.
    ///
    /// The first presence is announced through the startup notice (if
    /// enabled) rather than as a change. On failure the state stays empty and
    /// the first regular cycle takes over the first observation.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if either fetch fails.
    pub async fn bootstrap(&mut self) -> Result<(), CycleError> {
        let (profile, presence) = self.fetch().await?;

        detect(&presence, &profile.about_text, &mut self.state);
        tracing::info!(
            "Initial state for {}: {}",
            profile.label(),
            describe_presence(&presence)
        );

        if self.startup_notice {
            let notification = startup_notification(&profile, &presence, self.clock.now());
            self.deliver(&notification).await;
        }

        Ok(())
    }

    /// Runs one cycle, logs its outcome, then sleeps for the interval.
    ///
    /// The sleep happens even if the cycle failed.
    ///
    /// # Errors
    ///
    /// Returns the cycle's error after it has been logged and the sleep has completed.
    pub async fn tick(&mut self) -> Result<CycleReport, CycleError> {
        let outcome = self.run_cycle().await;
        log_outcome(&outcome);
        self.sleeper.sleep(self.interval).await;
        outcome
    }

    /// Fetches both snapshots, detects changes and forwards them.
    ///
    /// Both fetches complete before any detection, so a failed cycle leaves
    /// the state untouched. Notifier failures are logged and counted but do
    /// not fail the cycle.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if either fetch fails.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        let (profile, presence) = self.fetch().await?;
        let events = detect(&presence, &profile.about_text, &mut self.state);

        let mut report = CycleReport::default();
        for event in &events {
            log_event(event);
            let notification = change_notification(&profile, event, self.clock.now());
            if self.deliver(&notification).await {
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        }
        report.events = events;

        Ok(report)
    }

    async fn fetch(&self) -> Result<(ProfileSnapshot, PresenceSnapshot), CycleError> {
        let profile = self.fetcher.fetch_profile(self.entity_id).await?;
        let presence = self.fetcher.fetch_presence(self.entity_id).await?;
        Ok((profile, presence))
    }

    /// Sends one notification; returns whether it was accepted.
    async fn deliver(&self, notification: &Notification) -> bool {
        match self.notifier.notify(notification).await {
            Ok(()) => {
                tracing::debug!("Notification sent: {}", notification.title);
                true
            }
            Err(e) => {
                tracing::warn!("Webhook failed for \"{}\": {e}", notification.title);
                false
            }
        }
    }
}

fn describe_presence(presence: &PresenceSnapshot) -> String {
    let mut text = presence.status.to_string();
    if let Some(location) = presence.last_location.as_deref().filter(|l| !l.is_empty()) {
        text.push_str(" at ");
        text.push_str(location);
    }
    if let Some(place) = presence.place_id {
        let _ = write!(text, " (place {place})");
    }
    text
}

fn log_event(event: &ChangeEvent) {
    match event {
        ChangeEvent::Presence(change) => {
            if let Some(previous) = &change.previous {
                tracing::info!(
                    "Presence changed: {} -> {}",
                    describe_presence(previous),
                    describe_presence(&change.current)
                );
            } else {
                tracing::info!("Presence observed: {}", describe_presence(&change.current));
            }
        }
        ChangeEvent::About(change) => tracing::info!(
            "About text changed ({} -> {} chars)",
            change.previous.chars().count(),
            change.current.chars().count()
        ),
    }
}

fn log_outcome(outcome: &Result<CycleReport, CycleError>) {
    match outcome {
        Ok(report) if report.is_quiet() => tracing::debug!("No changes"),
        Ok(report) => tracing::debug!(
            "{} change(s), {} notification(s) sent, {} failed",
            report.events.len(),
            report.delivered,
            report.failed
        ),
        // Display already names the failure class.
        Err(e) => tracing::error!("{e}"),
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
