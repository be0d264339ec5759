//! `ev-fleet`: the vehicles of the building.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`battery`]   | `Battery`: clamped stored-energy arithmetic               |
//! | [`vehicle`]   | `Vehicle`, `ChargingState`, `DayOutcome`                  |
//!
//! A vehicle never touches a charger directly.  Its daily [`Vehicle::step`]
//! reports whether it wants a charger, and the environment decides which one
//! (if any) it gets.

pub mod battery;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use battery::Battery;
pub use vehicle::{ChargingState, DayOutcome, Vehicle};
