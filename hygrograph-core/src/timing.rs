//! Task timing
//!
//! Each task keeps its own last-fire timestamp and period. Time is a
//! wrapping 32-bit millisecond counter since boot, so the elapsed-time
//! check stays correct across the ~49 day rollover.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Milliseconds since boot (wraps)
pub type Millis = u32;

/// Minimum time between acquisition attempts
pub const SENSOR_PERIOD_MS: Millis = 2000;

/// Yield after every acquisition activation
pub const ACQUISITION_YIELD_MS: Millis = 100;

/// Minimum time between graphics engine event-processing calls
pub const GRAPHICS_TICK_PERIOD_MS: Millis = 5;

/// Yield after every graphics tick activation
pub const GRAPHICS_TICK_YIELD_MS: Millis = 5;

/// Cadence of the buffer to chart push
pub const DISPLAY_REFRESH_YIELD_MS: Millis = 100;

/// Last-fire timestamp plus fixed period for one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskTiming {
    last_fire_ms: Millis,
    period_ms: Millis,
}

impl TaskTiming {
    /// Start timing at `now_ms`; the first fire happens one period later
    pub const fn new(period_ms: Millis, now_ms: Millis) -> Self {
        Self {
            last_fire_ms: now_ms,
            period_ms,
        }
    }

    /// Time since the last fire
    pub const fn elapsed(&self, now_ms: Millis) -> Millis {
        now_ms.wrapping_sub(self.last_fire_ms)
    }

    /// Check whether a full period has passed since the last fire
    pub const fn is_due(&self, now_ms: Millis) -> bool {
        self.elapsed(now_ms) >= self.period_ms
    }

    /// Fire if due
    ///
    /// On firing the last-fire timestamp becomes `now_ms` (not
    /// `last + period`), so late activations push the schedule back
    /// instead of catching up.
    pub fn fire_if_due(&mut self, now_ms: Millis) -> bool {
        if self.is_due(now_ms) {
            self.last_fire_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Timestamp of the last fire
    pub const fn last_fire(&self) -> Millis {
        self.last_fire_ms
    }

    /// Configured period
    pub const fn period(&self) -> Millis {
        self.period_ms
    }
}
