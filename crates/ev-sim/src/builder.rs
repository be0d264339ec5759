//! Fluent builder for constructing an [`Environment`].

use ev_core::{AgentRng, ConfigError, SimClock, SimConfig, SimRng, VehicleId};
use ev_fleet::{Battery, Vehicle};
use ev_grid::Grid;
use tracing::info;

use crate::{Environment, SimError, SimResult};

/// Seed offsets for the independent child RNGs drawn from the run seed.
const SETUP_STREAM: u64 = 0;
const SCHEDULE_STREAM: u64 = 1;

/// Fluent builder for [`Environment`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, run length, topology and policies
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                                  |
/// |------------------|----------------------------------------------------------|
/// | `.grid(g)`       | `Grid::from_config` with the configured assignment/allocation |
/// | `.vehicles(v)`   | `vehicle_count` vehicles with drawn batteries and charge |
///
/// Supplying a grid or fleet directly is how tests pin an exact scenario.
///
/// # Example
///
/// ```rust,ignore
/// let mut env = EnvironmentBuilder::new(config).build()?;
/// env.run(&mut NoopObserver);
/// ```
pub struct EnvironmentBuilder {
    config:   SimConfig,
    grid:     Option<Grid>,
    vehicles: Option<Vec<Vehicle>>,
}

impl EnvironmentBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            grid:     None,
            vehicles: None,
        }
    }

    /// Use a pre-wired grid instead of generating one from
    /// `config.building`.  Every charger must be available.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Use an explicit fleet instead of generating one.  `vehicles[i]` must
    /// have ID `i` and be idle.
    pub fn vehicles(mut self, vehicles: Vec<Vehicle>) -> Self {
        self.vehicles = Some(vehicles);
        self
    }

    /// Validate inputs, create every entity, and return a ready-to-step
    /// [`Environment`].
    pub fn build(self) -> SimResult<Environment> {
        let config = self.config;
        config.policy.validate()?;
        if self.grid.is_none() || self.vehicles.is_none() {
            config.building.validate()?;
        }

        let mut root = SimRng::new(config.seed);
        let mut setup = root.child(SETUP_STREAM);
        let schedule_rng = root.child(SCHEDULE_STREAM);

        // ── Grid ──────────────────────────────────────────────────────────
        let grid = match self.grid {
            Some(grid) => {
                if grid.chargers().is_empty() {
                    return Err(ConfigError::ZeroCount { what: "charger count" }.into());
                }
                if let Some(c) = grid.chargers().iter().find(|c| !c.is_available()) {
                    return Err(SimError::NotIdle { what: "charger", index: c.id().index() });
                }
                grid
            }
            None => Grid::from_config(
                &config.building,
                config.policy.allocation,
                config.policy.breaker_assignment,
                &mut setup,
            )?,
        };

        // ── Fleet ─────────────────────────────────────────────────────────
        let vehicles = match self.vehicles {
            Some(vehicles) => {
                if vehicles.is_empty() {
                    return Err(ConfigError::ZeroCount { what: "vehicle count" }.into());
                }
                for (i, v) in vehicles.iter().enumerate() {
                    if v.id().index() != i {
                        return Err(SimError::IdMismatch { what: "vehicle", index: i });
                    }
                    if v.is_charging() {
                        return Err(SimError::NotIdle { what: "vehicle", index: i });
                    }
                }
                vehicles
            }
            None => {
                let count = config.building.vehicle_count;
                let mut vehicles = Vec::with_capacity(count);
                for i in 0..count {
                    let id = VehicleId::try_from(i)
                        .map_err(|_| ConfigError::TooMany { what: "vehicle count", count })?;
                    let capacity = setup.sample(config.building.vehicle_battery_range);
                    let fraction = setup.sample(config.policy.initial_charge_range);
                    vehicles.push(Vehicle::new(id, Battery::with_fraction(capacity, fraction)));
                }
                vehicles
            }
        };

        let rngs = vehicles.iter().map(|v| AgentRng::new(config.seed, v.id())).collect();
        let engaged = vec![false; vehicles.len()];

        info!(
            breakers = grid.breakers().len(),
            chargers = grid.chargers().len(),
            vehicles = vehicles.len(),
            seed = config.seed,
            "environment built"
        );

        Ok(Environment {
            config,
            clock: SimClock::new(),
            grid,
            vehicles,
            rngs,
            schedule_rng,
            engaged,
            rejected_requests: 0,
        })
    }
}

impl Environment {
    /// Build an environment entirely from `config`.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        EnvironmentBuilder::new(config).build()
    }
}
