//! Plain values handed to observers and callers.

use ev_core::Day;

/// Aggregate read-only view of the environment after a step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Metrics {
    /// Steps completed so far.
    pub day:               Day,
    /// Energy stored across every vehicle battery (kWh).
    pub total_stored_kwh:  f64,
    /// Chargers currently in the `Active` state.
    pub active_chargers:   usize,
    /// Charging requests rejected since the run started.
    pub rejected_requests: u64,
    /// Summed power allocated to active chargers, across all breakers.
    pub allocated_power:   f64,
}

/// What happened during one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// The day that was simulated.
    pub day:           Day,
    /// Energy drained from batteries by driving.
    pub consumed_kwh:  f64,
    /// Energy actually added to batteries (after clamping at capacity).
    pub delivered_kwh: f64,
    /// Chargers bound to a vehicle this step.
    pub activations:   usize,
    /// Chargers released because their vehicle filled up.
    pub deactivations: usize,
    /// Charging requests that found no available charger.
    pub rejections:    usize,
    /// Broken charger↔vehicle bindings that were reset.
    pub repairs:       usize,
}

impl StepReport {
    pub fn new(day: Day) -> Self {
        Self { day, ..Self::default() }
    }
}
