//! Process-wide awakened-mode window.
//!
//! The mode is a single expiry instant: active while the clock is before it.
//! There is no explicit clear; the window simply runs out.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// Expiring flag for the heightened ("awakened") mode.
#[derive(Debug)]
pub struct ModeTimer<C: Clock = SystemClock> {
    clock: C,
    expires_at: Mutex<Option<Instant>>,
}

impl ModeTimer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ModeTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ModeTimer<C> {
    /// Create an inactive timer reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            expires_at: Mutex::new(None),
        }
    }

    /// Open a window of `duration` from now, replacing any current window.
    pub fn activate(&self, duration: Duration) {
        let expiry = self.clock.now() + duration;
        *self.lock() = Some(expiry);
        tracing::info!(window_secs = duration.as_secs(), "Awakened mode activated");
    }

    /// Whether the current time is before the stored expiry.
    pub fn is_active(&self) -> bool {
        match *self.lock() {
            Some(expiry) => self.clock.now() < expiry,
            None => false,
        }
    }

    /// Time left in the window; zero when inactive.
    pub fn remaining(&self) -> Duration {
        match *self.lock() {
            Some(expiry) => expiry.saturating_duration_since(self.clock.now()),
            None => Duration::ZERO,
        }
    }

    /// Current instant according to this timer's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Instant>> {
        // The guarded value is a plain Option<Instant>; a poisoned lock still
        // holds a valid one.
        self.expires_at
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
