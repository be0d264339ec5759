//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DaySummaryRow, OutputResult, VehicleSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`, since observer hooks cannot fail.
pub trait OutputWriter {
    /// Write a batch of vehicle snapshots.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one day summary row.
    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
