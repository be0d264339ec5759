//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `day_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DaySummaryRow, OutputResult, VehicleSnapshotRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record([
            "vehicle_id",
            "day",
            "charge_level_kwh",
            "battery_capacity_kwh",
            "charging",
            "charger_id",
        ])?;

        let mut summaries = Writer::from_path(dir.join("day_summaries.csv"))?;
        summaries.write_record([
            "day",
            "total_stored_kwh",
            "active_chargers",
            "rejected_requests",
            "allocated_power",
            "consumed_kwh",
            "delivered_kwh",
        ])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.vehicle_id.to_string(),
                row.day.to_string(),
                row.charge_level_kwh.to_string(),
                row.battery_capacity_kwh.to_string(),
                (row.charging as u8).to_string(),
                row.charger_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.day.to_string(),
            row.total_stored_kwh.to_string(),
            row.active_chargers.to_string(),
            row.rejected_requests.to_string(),
            row.allocated_power.to_string(),
            row.consumed_kwh.to_string(),
            row.delivered_kwh.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
