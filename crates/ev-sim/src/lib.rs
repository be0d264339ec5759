//! `ev-sim`: the environment that owns every breaker, charger, and vehicle
//! and advances them one day at a time.
//!
//! # Day loop
//!
//! ```text
//! step():
//!   for each agent, once (chargers then vehicles, or shuffled):
//!     Charger: if active, deliver current_power × delivery_factor to the
//!              bound vehicle; release it when the battery is full.
//!              An active charger whose binding is broken is reset.
//!     Vehicle: if idle, drive and drain; if below the threshold, request
//!              a charger (first available in ID order, else rejected).
//!   every activation/release reallocates the affected breaker.
//!   a vehicle plugged in or charged this step does not act again until
//!   the next one, so it never both drives and charges in a step.
//!   clock.advance()
//! ```
//!
//! Execution is single-threaded and sequential; a step's effects are final.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::SimConfig;
//! use ev_sim::{EnvironmentBuilder, NoopObserver};
//!
//! let mut env = EnvironmentBuilder::new(SimConfig::default()).build()?;
//! env.run(&mut NoopObserver);
//! println!("{:?}", env.metrics());
//! ```

pub mod builder;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod observer;


pub use builder::EnvironmentBuilder;
pub use environment::Environment;
pub use error::{SimError, SimResult};
pub use metrics::{Metrics, StepReport};
pub use observer::{NoopObserver, SimObserver};
