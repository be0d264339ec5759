//! `ev-core`: foundational types for the building EV-charging simulator.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `ChargerId`, `BreakerId`                 |
//! | [`time`]        | `Day`, `SimClock`                                     |
//! | [`rng`]         | `AgentRng` (per-vehicle), `SimRng` (global)           |
//! | [`config`]      | `SimConfig`, `BuildingConfig`, `PolicyConfig`, policy enums |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ActivationOrder, AllocationPolicy, BreakerAssignment, BuildingConfig, PolicyConfig, Range,
    SimConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use ids::{BreakerId, ChargerId, VehicleId};
pub use rng::{AgentRng, SimRng};
pub use time::{Day, SimClock};
