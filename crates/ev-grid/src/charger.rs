//! The charger state machine.
//!
//! ```text
//!   Available ──engage(vehicle)──▶ Active ──release()──▶ Available
//! ```
//!
//! Transitions are driven by [`Grid`][crate::Grid], which also triggers the
//! owning breaker's reallocation after each one.  The activation state and
//! the bound vehicle are stored separately so that the grid can detect and
//! repair an `Active` charger with no vehicle instead of assuming it away.

use ev_core::{BreakerId, ChargerId, VehicleId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargerState {
    Available,
    Active,
}

/// One charging point wired to a single breaker for its whole life.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charger {
    id:            ChargerId,
    breaker:       BreakerId,
    nominal_power: f64,
    current_power: f64,
    state:         ChargerState,
    vehicle:       Option<VehicleId>,
}

impl Charger {
    pub(crate) fn new(id: ChargerId, breaker: BreakerId, nominal_power: f64) -> Self {
        Self {
            id,
            breaker,
            nominal_power,
            current_power: 0.0,
            state:         ChargerState::Available,
            vehicle:       None,
        }
    }

    #[inline]
    pub fn id(&self) -> ChargerId {
        self.id
    }

    /// The breaker feeding this charger.  Fixed at creation.
    #[inline]
    pub fn breaker(&self) -> BreakerId {
        self.breaker
    }

    /// Rated maximum power.
    #[inline]
    pub fn nominal_power(&self) -> f64 {
        self.nominal_power
    }

    /// Power currently granted by the breaker.  Zero while available.
    #[inline]
    pub fn current_power(&self) -> f64 {
        self.current_power
    }

    #[inline]
    pub fn state(&self) -> ChargerState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ChargerState::Active
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.state == ChargerState::Available
    }

    #[inline]
    pub fn bound_vehicle(&self) -> Option<VehicleId> {
        self.vehicle
    }

    /// `true` when a vehicle is bound exactly when the charger is active.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.is_active() == self.vehicle.is_some()
    }

    /// Energy delivered in one step at the current allocation.
    #[inline]
    pub fn delivery(&self, delivery_factor: f64) -> f64 {
        self.current_power * delivery_factor
    }

    /// Bind `vehicle` and become active.  No-op returning `false` unless
    /// currently available.
    pub(crate) fn engage(&mut self, vehicle: VehicleId) -> bool {
        if !self.is_available() {
            return false;
        }
        self.state = ChargerState::Active;
        self.vehicle = Some(vehicle);
        true
    }

    /// Unbind, drop the allocation, and become available.  Returns the vehicle
    /// that was bound, if any.
    pub(crate) fn release(&mut self) -> Option<VehicleId> {
        self.state = ChargerState::Available;
        self.current_power = 0.0;
        self.vehicle.take()
    }

    /// Accept an allocation, clamped to `[0, nominal_power]`.
    pub(crate) fn set_power(&mut self, power: f64) {
        self.current_power = power.clamp(0.0, self.nominal_power);
    }

    /// Put the charger into `Active` without a vehicle, to exercise the
    /// repair path.
    #[cfg(test)]
    pub(crate) fn corrupt_active_without_vehicle(&mut self) {
        self.state = ChargerState::Active;
        self.vehicle = None;
    }
}
