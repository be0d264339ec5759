//! `ev-grid`: the building's electrical side: breakers and the chargers
//! wired to them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`charger`]     | `Charger`, `ChargerState`                                 |
//! | [`breaker`]     | `Breaker`, its capacity budget and reallocation pass      |
//! | [`allocation`]  | Pure share computations: fair share and water filling     |
//! | [`grid`]        | `Grid`: owns both, wires the topology, drives transitions |
//! | [`error`]       | `GridError`, `GridResult`                                 |
//!
//! # Conservation
//!
//! After every reallocation, for every breaker:
//!
//! ```text
//! Σ current_power(c) for active c on breaker  ≤  breaker.capacity
//! 0 ≤ current_power(c) ≤ nominal_power(c)       for every charger
//! ```
//!
//! Both hold by construction: a breaker's budget is recomputed from scratch
//! every time one of its chargers is activated or released, and a charger
//! clamps any power it is given to its own rating.

pub mod allocation;
pub mod breaker;
pub mod charger;
pub mod error;
pub mod grid;

#[cfg(test)]
mod tests;

pub use allocation::{allocate, fair_share, water_filling};
pub use breaker::Breaker;
pub use charger::{Charger, ChargerState};
pub use error::{GridError, GridResult};
pub use grid::Grid;
