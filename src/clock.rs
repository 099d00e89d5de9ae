//! Time sources.
//!
//! The core never reads the wall clock itself: the driver samples a `Clock`
//! once per frame and hands the reading in as a `FrameTime`.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic reading since an arbitrary origin.
    fn now(&self) -> Duration;
}

/// Real time, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for deterministic runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// One frame's worth of time: the clock reading and the seconds elapsed since
/// the previous frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub now: Duration,
    pub delta: f32,
}

impl FrameTime {
    pub fn new(now: Duration, delta: f32) -> Self {
        Self { now, delta }
    }

    pub fn sample(clock: &impl Clock, delta: f32) -> Self {
        Self::new(clock.now(), delta)
    }

    /// Delta with negative, NaN and infinite values collapsed to zero.
    pub fn delta_seconds(&self) -> f32 {
        if self.delta.is_finite() && self.delta > 0.0 {
            self.delta
        } else {
            0.0
        }
    }
}
