//! Run configuration and the explicit policy choices of the model.
//!
//! Every behavior that can reasonably differ between building models is a
//! named field of [`PolicyConfig`] rather than a hard-coded constant.
//! `Default` reproduces the reference run: 10 chargers, 20 vehicles,
//! 5 breakers rated `[20, 30, 30, 40, 50]`, 100 days.

use crate::{ConfigError, ConfigResult};

// ── Range ─────────────────────────────────────────────────────────────────────

/// A closed real interval `[min, max]` used for uniform draws.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A degenerate range that always yields `value`.
    pub const fn fixed(value: f64) -> Self {
        Self { min: value, max: value }
    }

    #[inline]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both bounds finite and `min <= max`; with `positive`, also `min > 0`.
    fn check(self, what: &'static str, positive: bool) -> ConfigResult<()> {
        let lower_ok = if positive { self.min > 0.0 } else { self.min >= 0.0 };
        if !self.min.is_finite() || !self.max.is_finite() || !lower_ok || self.max < self.min {
            return Err(ConfigError::InvalidRange { what, min: self.min, max: self.max });
        }
        Ok(())
    }
}

// ── Policy enums ──────────────────────────────────────────────────────────────

/// How chargers are wired to breakers at setup.  The topology never changes
/// afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakerAssignment {
    /// Charger `i` feeds from breaker `i % breaker_count`.
    #[default]
    RoundRobin,
    /// Each charger picks a breaker uniformly at random from the setup RNG.
    Random,
}

/// How a breaker divides its capacity among its active chargers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllocationPolicy {
    /// Equal split `capacity / k`, each capped at the charger's rating.
    /// Capacity left unused by capped chargers is not handed to the others.
    #[default]
    FairShare,
    /// Equal split with leftover redistribution: chargers whose rating is
    /// below their share are capped and the remainder is re-split among the
    /// rest (max-min fairness).
    WaterFilling,
}

/// The order in which agents act within one step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationOrder {
    /// All chargers in ID order, then all vehicles in ID order.
    #[default]
    ChargersThenVehicles,
    /// Every charger and vehicle once, in an order reshuffled each step from
    /// the seeded scheduling RNG.
    Shuffled,
}

// ── BuildingConfig ────────────────────────────────────────────────────────────

/// The building topology and fleet: the setup contract of the environment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildingConfig {
    pub charger_count: usize,
    pub vehicle_count: usize,
    pub breaker_count: usize,

    /// One capacity per breaker, in the same power unit as charger ratings.
    pub breaker_capacities: Vec<f64>,

    /// Nominal charger ratings are drawn uniformly from this range.
    pub charger_power_range: Range,

    /// Battery capacities (kWh) are drawn uniformly from this range.
    pub vehicle_battery_range: Range,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            charger_count:         10,
            vehicle_count:         20,
            breaker_count:         5,
            breaker_capacities:    vec![20.0, 30.0, 30.0, 40.0, 50.0],
            charger_power_range:   Range::new(6.0, 48.0),
            vehicle_battery_range: Range::new(50.0, 100.0),
        }
    }
}

impl BuildingConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.charger_count == 0 {
            return Err(ConfigError::ZeroCount { what: "charger count" });
        }
        if self.vehicle_count == 0 {
            return Err(ConfigError::ZeroCount { what: "vehicle count" });
        }
        if self.breaker_count == 0 {
            return Err(ConfigError::ZeroCount { what: "breaker count" });
        }
        for (what, count) in [
            ("charger count", self.charger_count),
            ("vehicle count", self.vehicle_count),
            ("breaker count", self.breaker_count),
        ] {
            if u32::try_from(count).is_err() {
                return Err(ConfigError::TooMany { what, count });
            }
        }
        if self.breaker_capacities.is_empty() {
            return Err(ConfigError::EmptyCapacities { breakers: self.breaker_count });
        }
        if self.breaker_capacities.len() != self.breaker_count {
            return Err(ConfigError::CapacityCountMismatch {
                expected: self.breaker_count,
                got:      self.breaker_capacities.len(),
            });
        }
        for &cap in &self.breaker_capacities {
            if !(cap.is_finite() && cap > 0.0) {
                return Err(ConfigError::NonPositive { what: "breaker capacity", value: cap });
            }
        }
        self.charger_power_range.check("charger power", true)?;
        self.vehicle_battery_range.check("vehicle battery", true)?;
        Ok(())
    }
}

// ── PolicyConfig ──────────────────────────────────────────────────────────────

/// Behavioral constants and policy switches.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolicyConfig {
    /// A vehicle requests a charger when `charge < threshold * capacity`.
    pub charge_threshold: f64,

    pub breaker_assignment: BreakerAssignment,
    pub allocation:         AllocationPolicy,
    pub activation_order:   ActivationOrder,

    /// Energy used per kilometre driven (kWh/km).
    pub consumption_kwh_per_km: f64,

    /// Distance driven on an idle day is drawn uniformly from this range (km).
    pub daily_km_range: Range,

    /// Initial state of charge, as a fraction of battery capacity.
    pub initial_charge_range: Range,

    /// Energy (kWh) delivered per unit of allocated power per step.
    /// `0.24` corresponds to amperes at 240 V.
    pub delivery_factor: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            charge_threshold:       0.2,
            breaker_assignment:     BreakerAssignment::RoundRobin,
            allocation:             AllocationPolicy::FairShare,
            activation_order:       ActivationOrder::ChargersThenVehicles,
            consumption_kwh_per_km: 0.2,
            daily_km_range:         Range::new(20.0, 80.0),
            initial_charge_range:   Range::new(0.2, 1.0),
            delivery_factor:        0.24,
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.charge_threshold) {
            return Err(ConfigError::InvalidFraction {
                what:  "charge threshold",
                value: self.charge_threshold,
            });
        }
        if !(self.consumption_kwh_per_km.is_finite() && self.consumption_kwh_per_km >= 0.0) {
            return Err(ConfigError::NonPositive {
                what:  "consumption per km",
                value: self.consumption_kwh_per_km,
            });
        }
        if !(self.delivery_factor.is_finite() && self.delivery_factor > 0.0) {
            return Err(ConfigError::NonPositive {
                what:  "delivery factor",
                value: self.delivery_factor,
            });
        }
        self.daily_km_range.check("daily distance", false)?;
        self.initial_charge_range.check("initial charge", false)?;
        if self.initial_charge_range.max > 1.0 {
            return Err(ConfigError::InvalidFraction {
                what:  "initial charge",
                value: self.initial_charge_range.max,
            });
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to the environment builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Days simulated by `Environment::run`.
    pub total_days: u64,

    /// Call the snapshot hook every N days.  1 = every day; 0 = never.
    pub output_interval_days: u64,

    pub building: BuildingConfig,
    pub policy:   PolicyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                 42,
            total_days:           100,
            output_interval_days: 1,
            building:             BuildingConfig::default(),
            policy:               PolicyConfig::default(),
        }
    }
}

impl SimConfig {
    /// Check every field.  Called by the environment builder before any
    /// entity is created.
    pub fn validate(&self) -> ConfigResult<()> {
        self.building.validate()?;
        self.policy.validate()
    }

    /// The day at which `run` stops (exclusive upper bound).
    #[inline]
    pub fn end_day(&self) -> crate::Day {
        crate::Day(self.total_days)
    }
}
