//! The `Environment` and its day loop.

use ev_core::{
    ActivationOrder, AgentRng, BreakerId, ChargerId, Day, SimClock, SimConfig, SimRng, VehicleId,
};
use ev_fleet::Vehicle;
use ev_grid::{Breaker, Charger, Grid};
use tracing::{info, trace, warn};

use crate::{Metrics, SimObserver, StepReport};

/// One entry of the per-step activation order.
#[derive(Copy, Clone, Debug)]
enum Agent {
    Charger(ChargerId),
    Vehicle(VehicleId),
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Owns every breaker, charger, and vehicle of one run, plus the clock and
/// the rejection counter.
///
/// State is private: callers drive the loop with [`step`][Self::step],
/// [`run`][Self::run], or [`run_days`][Self::run_days] and read results
/// through the `&self` accessors.  Create via
/// [`EnvironmentBuilder`][crate::EnvironmentBuilder].
pub struct Environment {
    pub(crate) config: SimConfig,
    pub(crate) clock:  SimClock,
    pub(crate) grid:   Grid,

    /// Indexed by `VehicleId`.
    pub(crate) vehicles: Vec<Vehicle>,

    /// Per-vehicle consumption RNGs, parallel to `vehicles`.
    pub(crate) rngs: Vec<AgentRng>,

    /// Drives the `Shuffled` activation order.
    pub(crate) schedule_rng: SimRng,

    /// Vehicles that were plugged in or received energy during the current
    /// step.  They neither drive nor take a delivery again until the next one.
    pub(crate) engaged: Vec<bool>,

    pub(crate) rejected_requests: u64,
}

impl Environment {
    // ── Run contract ──────────────────────────────────────────────────────

    /// Simulate one day: every charger and every vehicle acts exactly once.
    ///
    /// A vehicle either drives or charges within a step, never both,
    /// whatever the activation order.
    pub fn step(&mut self) -> StepReport {
        let day = self.clock.current_day;
        let mut report = StepReport::new(day);
        self.engaged.fill(false);

        let mut order: Vec<Agent> = self
            .grid
            .chargers()
            .iter()
            .map(|c| Agent::Charger(c.id()))
            .chain(self.vehicles.iter().map(|v| Agent::Vehicle(v.id())))
            .collect();
        if self.config.policy.activation_order == ActivationOrder::Shuffled {
            self.schedule_rng.shuffle(&mut order);
        }

        for agent in order {
            match agent {
                Agent::Charger(c) => self.step_charger(c, &mut report),
                Agent::Vehicle(v) => self.step_vehicle(v, &mut report),
            }
        }

        self.clock.advance();
        report
    }

    /// Run from the current day to `config.end_day()`.
    ///
    /// Calls observer hooks around every step.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        let end = self.config.end_day();
        info!(
            from = %self.clock.current_day,
            to = %end,
            seed = self.config.seed,
            "simulation started"
        );
        while self.clock.current_day < end {
            self.observed_step(observer);
        }
        observer.on_sim_end(self.clock.current_day);
        let m = self.metrics();
        info!(
            day = %m.day,
            stored_kwh = m.total_stored_kwh,
            active_chargers = m.active_chargers,
            rejected = m.rejected_requests,
            "simulation finished"
        );
    }

    /// Run exactly `n` days from the current position (ignores `end_day`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_days<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.observed_step(observer);
        }
    }

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_day;
        observer.on_step_start(now);
        let report = self.step();
        observer.on_step_end(&report, self);
        let interval = self.config.output_interval_days;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, self);
        }
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Charger behavior: deliver one step of energy, release when full.
    fn step_charger(&mut self, charger: ChargerId, report: &mut StepReport) {
        let Some(c) = self.grid.charger(charger) else {
            return;
        };
        if !c.is_active() {
            return;
        }
        let energy = c.delivery(self.config.policy.delivery_factor);

        // The binding must be symmetric: the charger names a vehicle and that
        // vehicle names this charger back.
        let bound = c.bound_vehicle().filter(|v| {
            self.vehicles.get(v.index()).and_then(Vehicle::bound_charger) == Some(charger)
        });
        let Some(vehicle) = bound else {
            self.grid.repair(charger);
            report.repairs += 1;
            return;
        };
        // Plugged in earlier this step, after driving.
        if self.engaged[vehicle.index()] {
            return;
        }
        self.engaged[vehicle.index()] = true;

        let v = &mut self.vehicles[vehicle.index()];
        let before = v.charge_level();
        let full = v.receive(energy);
        report.delivered_kwh += v.charge_level() - before;

        if full {
            v.unbind();
            self.grid.deactivate(charger);
            report.deactivations += 1;
        }
    }

    /// Vehicle behavior: drive if idle, then request a charger if low.
    fn step_vehicle(&mut self, vehicle: VehicleId, report: &mut StepReport) {
        let i = vehicle.index();

        // A vehicle pointing at a charger that does not point back can never
        // be released by that charger; return it to idle.
        if let Some(charger) = self.vehicles[i].bound_charger() {
            let held = self
                .grid
                .charger(charger)
                .is_some_and(|c| c.is_active() && c.bound_vehicle() == Some(vehicle));
            if !held {
                warn!(%vehicle, %charger, "reset vehicle bound to a charger that does not hold it");
                self.vehicles[i].unbind();
                report.repairs += 1;
            }
        }

        // Charged (and possibly released) earlier this step.
        if self.engaged[i] {
            return;
        }

        let outcome = self.vehicles[i].step(&mut self.rngs[i], &self.config.policy);
        report.consumed_kwh += outcome.consumed_kwh;
        if outcome.wants_charger {
            self.request_charger(vehicle, report);
        }
    }

    /// First-fit charger search in ID order.
    ///
    /// On success both sides are bound and the charger's breaker is
    /// reallocated.  On failure only the rejection counter changes.  A vehicle
    /// that is already charging is ignored.
    pub(crate) fn request_charger(
        &mut self,
        vehicle: VehicleId,
        report:  &mut StepReport,
    ) -> Option<ChargerId> {
        if self.vehicles[vehicle.index()].is_charging() {
            return None;
        }
        match self.grid.first_available() {
            Some(charger) => {
                self.grid.activate(charger, vehicle);
                self.vehicles[vehicle.index()].bind(charger);
                self.engaged[vehicle.index()] = true;
                report.activations += 1;
                Some(charger)
            }
            None => {
                self.rejected_requests += 1;
                report.rejections += 1;
                trace!(%vehicle, "charging request rejected: no charger available");
                None
            }
        }
    }

    // ── Read contract ─────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Steps completed so far.
    #[inline]
    pub fn day(&self) -> Day {
        self.clock.current_day
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    #[inline]
    pub fn chargers(&self) -> &[Charger] {
        self.grid.chargers()
    }

    #[inline]
    pub fn charger(&self, id: ChargerId) -> Option<&Charger> {
        self.grid.charger(id)
    }

    #[inline]
    pub fn breakers(&self) -> &[Breaker] {
        self.grid.breakers()
    }

    #[inline]
    pub fn breaker(&self, id: BreakerId) -> Option<&Breaker> {
        self.grid.breaker(id)
    }

    /// Summed power of the active chargers on breaker `id`.
    #[inline]
    pub fn breaker_load(&self, id: BreakerId) -> Option<f64> {
        self.grid.breaker_load(id)
    }

    /// Energy stored across every vehicle (kWh).
    pub fn total_stored_energy(&self) -> f64 {
        self.vehicles.iter().map(Vehicle::charge_level).sum()
    }

    #[inline]
    pub fn active_chargers(&self) -> usize {
        self.grid.active_count()
    }

    /// Charging requests rejected since the run started.
    #[inline]
    pub fn rejected_requests(&self) -> u64 {
        self.rejected_requests
    }

    /// Per-vehicle charge level, in `VehicleId` order.
    pub fn charge_levels(&self) -> impl Iterator<Item = (VehicleId, f64)> + '_ {
        self.vehicles.iter().map(|v| (v.id(), v.charge_level()))
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            day:               self.clock.current_day,
            total_stored_kwh:  self.total_stored_energy(),
            active_chargers:   self.active_chargers(),
            rejected_requests: self.rejected_requests,
            allocated_power:   self.grid.total_allocated_power(),
        }
    }
}
