//! `ev-output`: data collection for simulation runs.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                                    |
//! |-----------|-------------|--------------------------------------------------|
//! | *(none)*  | CSV         | `vehicle_snapshots.csv`, `day_summaries.csv`     |
//! | `sqlite`  | SQLite      | `output.db`                                      |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `ev_sim::SimObserver` and therefore only ever reads the
//! environment.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! env.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{DaySummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
