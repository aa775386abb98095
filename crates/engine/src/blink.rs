// Chunk: docs/chunks/caret_blink - Injected-clock caret blink phase

//! Caret blink phase, computed from a caller-supplied clock.
//!
//! The engine owns no timers: the host passes the current `Instant` in
//! whenever it paints or asks about caret visibility, and the phase is a
//! pure function of that instant. Keystrokes reset the phase so the caret
//! is solidly visible while typing. Deterministic in tests, no shared
//! global state between widget instances.

use std::time::{Duration, Instant};

/// Caret blink state for one widget instance.
#[derive(Debug, Clone, Copy)]
pub struct CaretBlink {
    interval: Duration,
    phase_origin: Instant,
}

impl CaretBlink {
    /// Creates a blink phase starting (visible) at `now`. A zero interval
    /// disables blinking entirely.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            phase_origin: now,
        }
    }

    /// Restarts the phase at `now`; the caret becomes visible immediately.
    /// Called on every keystroke and caret placement.
    pub fn reset(&mut self, now: Instant) {
        self.phase_origin = now;
    }

    /// True while the blink phase is in its visible half.
    pub fn is_visible(&self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        let elapsed = now.saturating_duration_since(self.phase_origin);
        (elapsed.as_millis() / self.interval.as_millis()) % 2 == 0
    }
}
