//! Simulation time model.
//!
//! Time is a monotonically increasing `Day` counter.  One step of the
//! environment is one simulated day; every agent acts exactly once per day.
//! There is no wall-clock mapping: the model is a pure day counter.

use std::fmt;

// ── Day ───────────────────────────────────────────────────────────────────────

/// An absolute simulation day counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u64);

impl Day {
    pub const ZERO: Day = Day(0);
}

impl std::ops::Add<u64> for Day {
    type Output = Day;
    #[inline]
    fn add(self, rhs: u64) -> Day {
        Day(self.0 + rhs)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The environment's step counter.
///
/// `current_day` is the day the *next* call to `step()` will execute, which is
/// also the number of steps already completed.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_day: Day,
}

impl SimClock {
    pub fn new() -> Self {
        Self { current_day: Day::ZERO }
    }

    /// Advance the clock by one day.
    #[inline]
    pub fn advance(&mut self) {
        self.current_day = self.current_day + 1;
    }

    /// Number of steps executed so far.
    #[inline]
    pub fn steps_completed(&self) -> u64 {
        self.current_day.0
    }

    /// Whole weeks elapsed since day 0, for human-readable logging.
    pub fn elapsed_weeks(&self) -> u64 {
        self.current_day.0 / 7
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (week {})", self.current_day, self.elapsed_weeks())
    }
}
