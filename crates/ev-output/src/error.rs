//! Failures while persisting charge levels and day summaries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv collector: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite collector: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
