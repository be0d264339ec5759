use ev_core::BreakerId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("breaker {0} does not exist")]
    UnknownBreaker(BreakerId),

    #[error("{what} must be positive and finite, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("no {what} IDs left")]
    TooMany { what: &'static str },
}

pub type GridResult<T> = Result<T, GridError>;
