//! The `Grid`: every breaker and charger of the building, plus the
//! transitions that keep their allocations consistent.

use ev_core::{
    AllocationPolicy, BreakerAssignment, BreakerId, BuildingConfig, ChargerId, SimRng, VehicleId,
};
use tracing::{debug, warn};

use crate::{Breaker, Charger, GridError, GridResult};

/// Owns the breakers and chargers and is the only place their state changes.
///
/// Each activation or release triggers exactly one reallocation of the
/// affected breaker, so the cost of a step is linear in the number of
/// charger transitions it contains.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    breakers: Vec<Breaker>,
    chargers: Vec<Charger>,
    policy:   AllocationPolicy,
}

impl Grid {
    /// An empty grid.  Wire it with [`add_breaker`][Self::add_breaker] and
    /// [`add_charger`][Self::add_charger].
    pub fn new(policy: AllocationPolicy) -> Self {
        Self {
            breakers: Vec::new(),
            chargers: Vec::new(),
            policy,
        }
    }

    /// Build the topology described by `building`.
    ///
    /// Breakers get their capacities in list order.  Charger ratings are
    /// drawn from `building.charger_power_range`, and each charger is wired
    /// according to `assignment`.  `building` is expected to be validated.
    pub fn from_config(
        building:   &BuildingConfig,
        policy:     AllocationPolicy,
        assignment: BreakerAssignment,
        rng:        &mut SimRng,
    ) -> GridResult<Self> {
        let mut grid = Grid::new(policy);
        for &capacity in &building.breaker_capacities {
            grid.add_breaker(capacity)?;
        }
        let breaker_count = grid.breakers.len();
        if breaker_count == 0 {
            return Err(GridError::UnknownBreaker(BreakerId(0)));
        }

        for i in 0..building.charger_count {
            let breaker = match assignment {
                BreakerAssignment::RoundRobin => i % breaker_count,
                BreakerAssignment::Random     => rng.gen_range(0..breaker_count),
            };
            let breaker = BreakerId::try_from(breaker)
                .map_err(|_| GridError::TooMany { what: "breaker" })?;
            let nominal = rng.sample(building.charger_power_range);
            grid.add_charger(breaker, nominal)?;
        }
        Ok(grid)
    }

    /// Add a breaker with the given capacity.
    pub fn add_breaker(&mut self, capacity: f64) -> GridResult<BreakerId> {
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(GridError::NonPositive { what: "breaker capacity", value: capacity });
        }
        let id = BreakerId::try_from(self.breakers.len())
            .map_err(|_| GridError::TooMany { what: "breaker" })?;
        self.breakers.push(Breaker::new(id, capacity));
        Ok(id)
    }

    /// Add a charger rated `nominal_power`, wired to `breaker`.
    pub fn add_charger(&mut self, breaker: BreakerId, nominal_power: f64) -> GridResult<ChargerId> {
        if !(nominal_power.is_finite() && nominal_power > 0.0) {
            return Err(GridError::NonPositive { what: "charger power", value: nominal_power });
        }
        let id = ChargerId::try_from(self.chargers.len())
            .map_err(|_| GridError::TooMany { what: "charger" })?;
        self.breakers
            .get_mut(breaker.index())
            .ok_or(GridError::UnknownBreaker(breaker))?
            .attach(id);
        self.chargers.push(Charger::new(id, breaker, nominal_power));
        Ok(id)
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    #[inline]
    pub fn breakers(&self) -> &[Breaker] {
        &self.breakers
    }

    #[inline]
    pub fn chargers(&self) -> &[Charger] {
        &self.chargers
    }

    #[inline]
    pub fn breaker(&self, id: BreakerId) -> Option<&Breaker> {
        self.breakers.get(id.index())
    }

    #[inline]
    pub fn charger(&self, id: ChargerId) -> Option<&Charger> {
        self.chargers.get(id.index())
    }

    /// Summed power of the active chargers on `id`.
    pub fn breaker_load(&self, id: BreakerId) -> Option<f64> {
        self.breaker(id).map(|b| b.load(&self.chargers))
    }

    pub fn active_count(&self) -> usize {
        self.chargers.iter().filter(|c| c.is_active()).count()
    }

    /// Summed power of every active charger in the building.
    pub fn total_allocated_power(&self) -> f64 {
        self.chargers
            .iter()
            .filter(|c| c.is_active())
            .map(Charger::current_power)
            .sum()
    }

    /// First charger in creation order that is available.
    pub fn first_available(&self) -> Option<ChargerId> {
        self.chargers.iter().find(|c| c.is_available()).map(Charger::id)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Bind `vehicle` to `charger` and reallocate its breaker.
    ///
    /// Returns `false` and leaves every charger untouched if `charger` is
    /// already active or does not exist.
    pub fn activate(&mut self, charger: ChargerId, vehicle: VehicleId) -> bool {
        let Some(c) = self.chargers.get_mut(charger.index()) else {
            return false;
        };
        if !c.engage(vehicle) {
            return false;
        }
        let breaker = c.breaker();
        let shared = self.reallocate(breaker);
        debug!(%charger, %vehicle, %breaker, shared, "charger activated");
        true
    }

    /// Release `charger` and reallocate its breaker.
    ///
    /// Returns the vehicle that was bound.  Releasing an available or unknown
    /// charger is a no-op returning `None`.
    pub fn deactivate(&mut self, charger: ChargerId) -> Option<VehicleId> {
        let c = self.chargers.get_mut(charger.index())?;
        if c.is_available() {
            return None;
        }
        let vehicle = c.release();
        let breaker = c.breaker();
        let shared = self.reallocate(breaker);
        debug!(%charger, %breaker, shared, "charger released");
        vehicle
    }

    /// Force an inconsistent charger back to `Available` and rebalance its
    /// breaker.  Returns the vehicle it claimed to hold, if any.
    pub fn repair(&mut self, charger: ChargerId) -> Option<VehicleId> {
        let c = self.chargers.get_mut(charger.index())?;
        let claimed = c.release();
        let breaker = c.breaker();
        self.reallocate(breaker);
        warn!(%charger, %breaker, ?claimed, "reset charger with broken vehicle binding");
        claimed
    }

    /// Recompute `breaker`'s allocation.  Returns how many active chargers
    /// share it.
    pub fn reallocate(&mut self, breaker: BreakerId) -> usize {
        match self.breakers.get(breaker.index()) {
            Some(b) => b.reallocate(&mut self.chargers, self.policy),
            None    => 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn charger_mut(&mut self, id: ChargerId) -> &mut Charger {
        &mut self.chargers[id.index()]
    }
}
