//! Simulation time source.
//!
//! The orchestrator owns one [`Clock`] and reads it exactly once per tick, so
//! every growth check inside a tick sees the same instant. Nothing in the core
//! reads wall-clock time.

use serde::{Deserialize, Serialize};

use crate::shared::TICK_RATE_HZ;

/// Slack for comparing elapsed times. Tick-multiple timestamps such as
/// `n / 30` are not exact in `f64`, so an exact difference can land a few ulps short.
pub const TIME_EPSILON: f64 = 1e-9;

/// Seconds since the simulation started.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    pub fn secs(self) -> f64 {
        self.0
    }

    /// Elapsed seconds from `earlier` to `self`.
    pub fn since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    /// True once at least `secs` have passed since `earlier`.
    pub fn has_elapsed(self, earlier: Timestamp, secs: f64) -> bool {
        self.since(earlier) + TIME_EPSILON >= secs
    }
}

pub trait Clock {
    /// Move time forward by the host-supplied frame delta.
    fn advance(&mut self, dt: f32);
    fn now(&self) -> Timestamp;
}

/// Accumulates the deltas the host feeds it.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    elapsed: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SimClock {
    fn advance(&mut self, dt: f32) {
        self.elapsed += sanitize_dt(dt);
    }

    fn now(&self) -> Timestamp {
        Timestamp(self.elapsed)
    }
}

/// Advances by the same step every tick regardless of the delta it is handed.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f64,
    ticks: u64,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::from_hz(TICK_RATE_HZ)
    }
}

impl FixedStepClock {
    /// A non-positive or non-finite rate falls back to the reference rate.
    pub fn from_hz(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { TICK_RATE_HZ };
        Self {
            step: 1.0 / hz,
            ticks: 0,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Clock for FixedStepClock {
    fn advance(&mut self, _dt: f32) {
        self.ticks = self.ticks.saturating_add(1);
    }

    fn now(&self) -> Timestamp {
        Timestamp(self.ticks as f64 * self.step)
    }
}

/// Negative or non-finite deltas become zero; a tick cannot be rolled back.
pub fn sanitize_dt(dt: f32) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt as f64
    } else {
        0.0
    }
}
