//! The meeting clock.
//!
//! Elapsed time is always recomputed from the wall-clock delta between the
//! anchor timestamp and "now", never accumulated tick by tick, so drift from
//! slow or missed ticks is self-correcting.

use chrono::{DateTime, Utc};

/// Wall-clock elapsed-time source for one meeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetingClock {
    started_at: DateTime<Utc>,
    /// Elapsed value frozen by `halt`; `None` while running.
    frozen_seconds: Option<f64>,
}

impl MeetingClock {
    /// Starts a clock anchored at `now`, with elapsed time zero.
    #[must_use]
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            frozen_seconds: None,
        }
    }

    /// Seconds elapsed since the anchor, sampled at `now`.
    ///
    /// Returns the frozen value after `halt`. Clamped at zero so a caller
    /// clock that jumps backwards can never yield a negative elapsed time.
    #[allow(
        clippy::cast_precision_loss,
        reason = "millisecond counts stay far below f64's exact integer range"
    )]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        if let Some(frozen) = self.frozen_seconds {
            return frozen;
        }
        ((now - self.started_at).num_milliseconds() as f64 / 1000.0).max(0.0)
    }

    /// Freezes elapsed time at its value as of `now`.
    ///
    /// Subsequent samples return the frozen value. Halting an already-halted
    /// clock keeps the earlier freeze.
    pub fn halt(&mut self, now: DateTime<Utc>) {
        if self.frozen_seconds.is_none() {
            self.frozen_seconds = Some(self.elapsed_seconds(now));
        }
    }

    /// Whether the clock has been halted.
    pub fn is_halted(&self) -> bool {
        self.frozen_seconds.is_some()
    }

    /// Re-anchors the clock at `now`, clearing any freeze.
    ///
    /// Elapsed time is zero afterwards.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.started_at = now;
        self.frozen_seconds = None;
    }
}
