#![forbid(unsafe_code)]

//! Session clocks used to timestamp history entries.
//!
//! Timestamps are durations since the start of the editing session. The
//! timeline samples its clock once per insert; undo and redo only compare
//! stored timestamps and never read the clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use web_time::Instant;

/// Monotonic source of session time.
pub trait Clock {
    /// Time elapsed since the session started.
    fn now(&self) -> Duration;
}

/// Wall-clock session time, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    start: Instant,
}

impl SessionClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SessionClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-driven clock for tests and deterministic replays.
///
/// Clones share the same time, so a test can keep a handle while the
/// timeline owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.micros.store(duration_micros(now), Ordering::Relaxed);
    }

    /// Set the time from fractional seconds.
    pub fn set_secs(&self, secs: f64) {
        self.set(Duration::from_secs_f64(secs.max(0.0)));
    }

    pub fn advance(&self, by: Duration) {
        self.micros.fetch_add(duration_micros(by), Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }
}

/// Whole microseconds in `d`, saturating at `u64::MAX`.
pub(crate) fn duration_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
