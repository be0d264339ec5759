//! Deterministic per-vehicle and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (vehicle_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive vehicle IDs uniformly across the seed space.
//! This means:
//!
//! - Vehicles never share RNG state, so a vehicle's consumption draws do not
//!   depend on how many other vehicles acted before it in the same step.
//! - Growing the fleet at the end of the list does not disturb the draws of
//!   existing vehicles.
//!
//! Setup draws (battery sizes, charger ratings, random breaker assignment) and
//! the shuffled activation order use a single [`SimRng`] seeded from the same
//! global seed.  Nothing reads ambient global randomness.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Range, VehicleId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG.
///
/// Create one per vehicle at environment construction; stored in a parallel
/// `Vec<AgentRng>` so the vehicle list and its RNGs can be borrowed mutably
/// at the same time.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a vehicle ID.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw uniformly from the closed interval `[range.min, range.max]`.
    #[inline]
    pub fn sample(&mut self, range: Range) -> f64 {
        self.0.gen_range(range.min..=range.max)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for setup draws and the activation-order shuffle.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, so independent
    /// concerns (setup vs. scheduling) do not consume each other's draws.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Draw uniformly from the closed interval `[range.min, range.max]`.
    #[inline]
    pub fn sample(&mut self, range: Range) -> f64 {
        self.0.gen_range(range.min..=range.max)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
