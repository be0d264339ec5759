use ev_core::ConfigError;
use ev_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("grid wiring error: {0}")]
    Grid(#[from] GridError),

    #[error("{what} at index {index} has an ID that does not match its position")]
    IdMismatch {
        what:  &'static str,
        index: usize,
    },

    #[error("{what} at index {index} is already bound at construction")]
    NotIdle {
        what:  &'static str,
        index: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
