//! The vehicle agent.

use ev_core::{AgentRng, ChargerId, PolicyConfig, VehicleId};

use crate::Battery;

/// Whether a vehicle is on the road or plugged in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargingState {
    Idle,
    Charging,
}

/// What a vehicle did during one step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DayOutcome {
    /// Energy taken from the battery by driving.  Zero while charging.
    pub consumed_kwh: f64,
    /// The vehicle is idle and below its charging threshold, so the
    /// environment should try to give it a charger.
    pub wants_charger: bool,
}

/// An EV that drives on idle days and asks for a charger when low.
///
/// The bound charger is the only source of the charging state, so
/// `state() == Charging` iff `bound_charger().is_some()`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    id:      VehicleId,
    battery: Battery,
    charger: Option<ChargerId>,
}

impl Vehicle {
    pub fn new(id: VehicleId, battery: Battery) -> Self {
        Self { id, battery, charger: None }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    #[inline]
    pub fn charge_level(&self) -> f64 {
        self.battery.level()
    }

    #[inline]
    pub fn battery_capacity(&self) -> f64 {
        self.battery.capacity()
    }

    #[inline]
    pub fn state(&self) -> ChargingState {
        match self.charger {
            Some(_) => ChargingState::Charging,
            None    => ChargingState::Idle,
        }
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charger.is_some()
    }

    #[inline]
    pub fn bound_charger(&self) -> Option<ChargerId> {
        self.charger
    }

    /// The charging-need predicate: level below `threshold * capacity`.
    #[inline]
    pub fn needs_charge(&self, threshold: f64) -> bool {
        self.battery.is_below(threshold)
    }

    /// Run one day of the vehicle's behavior.
    ///
    /// 1. If idle, drive a distance drawn from `policy.daily_km_range` and
    ///    drain `km * consumption_kwh_per_km` (clamped at empty).
    /// 2. If still idle and below the threshold, flag a charging request.
    ///
    /// A charging vehicle neither drives nor re-requests.
    pub fn step(&mut self, rng: &mut AgentRng, policy: &PolicyConfig) -> DayOutcome {
        if self.is_charging() {
            return DayOutcome::default();
        }
        let km = rng.sample(policy.daily_km_range);
        let consumed_kwh = self.battery.drain(km * policy.consumption_kwh_per_km);
        DayOutcome {
            consumed_kwh,
            wants_charger: self.needs_charge(policy.charge_threshold),
        }
    }

    /// Record that `charger` accepted this vehicle.  Returns `false` (and
    /// changes nothing) if the vehicle is already bound.
    pub fn bind(&mut self, charger: ChargerId) -> bool {
        if self.charger.is_some() {
            return false;
        }
        self.charger = Some(charger);
        true
    }

    /// Return to idle.  Returns the charger that was bound, if any.
    pub fn unbind(&mut self) -> Option<ChargerId> {
        self.charger.take()
    }

    /// Add delivered energy.  Returns `true` once the battery is full.
    pub fn receive(&mut self, kwh: f64) -> bool {
        self.battery.charge(kwh)
    }
}
