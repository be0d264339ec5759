//! Bridges `SimObserver` hooks to an `OutputWriter`.

use ev_core::Day;
use ev_sim::{Environment, SimObserver, StepReport};

use crate::row::{DaySummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a summary row every day and per-vehicle
/// snapshots at the configured interval to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `env.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `env.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, report: &StepReport, env: &Environment) {
        let metrics = env.metrics();
        let row = DaySummaryRow {
            day:               report.day.0,
            total_stored_kwh:  metrics.total_stored_kwh,
            active_chargers:   metrics.active_chargers as u64,
            rejected_requests: metrics.rejected_requests,
            allocated_power:   metrics.allocated_power,
            consumed_kwh:      report.consumed_kwh,
            delivered_kwh:     report.delivered_kwh,
        };
        let result = self.writer.write_day_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, day: Day, env: &Environment) {
        let rows: Vec<VehicleSnapshotRow> = env
            .vehicles()
            .iter()
            .map(|v| VehicleSnapshotRow {
                vehicle_id:           v.id().0,
                day:                  day.0,
                charge_level_kwh:     v.charge_level(),
                battery_capacity_kwh: v.battery_capacity(),
                charging:             v.is_charging(),
                charger_id:           v.bound_charger().map_or(u32::MAX, |c| c.0),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_day: Day) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
