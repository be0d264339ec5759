//! Configuration error type.
//!
//! These are the only errors the simulator surfaces to its caller, and they
//! are all reported by [`SimConfig::validate`][crate::SimConfig::validate]
//! before the first step runs.  Resource exhaustion (no free charger) is
//! counted by the environment, never returned.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{what} must be at least 1")]
    ZeroCount { what: &'static str },

    #[error("{what} of {count} exceeds the ID space")]
    TooMany { what: &'static str, count: usize },

    #[error("{what} must be positive and finite, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("breaker capacity list is empty but {breakers} breakers were requested")]
    EmptyCapacities { breakers: usize },

    #[error("breaker count is {expected} but {got} capacities were supplied")]
    CapacityCountMismatch { expected: usize, got: usize },

    #[error("{what} range [{min}, {max}] is invalid")]
    InvalidRange { what: &'static str, min: f64, max: f64 },

    #[error("{what} must be a fraction in [0, 1], got {value}")]
    InvalidFraction { what: &'static str, value: f64 },
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
