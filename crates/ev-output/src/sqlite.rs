//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `vehicle_snapshots` and `day_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{DaySummaryRow, OutputResult, VehicleSnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS vehicle_snapshots (
                 vehicle_id           INTEGER NOT NULL,
                 day                  INTEGER NOT NULL,
                 charge_level_kwh     REAL    NOT NULL,
                 battery_capacity_kwh REAL    NOT NULL,
                 charging             INTEGER NOT NULL,
                 charger_id           INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS day_summaries (
                 day               INTEGER PRIMARY KEY,
                 total_stored_kwh  REAL    NOT NULL,
                 active_chargers   INTEGER NOT NULL,
                 rejected_requests INTEGER NOT NULL,
                 allocated_power   REAL    NOT NULL,
                 consumed_kwh      REAL    NOT NULL,
                 delivered_kwh     REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_snapshots \
                 (vehicle_id, day, charge_level_kwh, battery_capacity_kwh, charging, charger_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.vehicle_id,
                    row.day as i64,
                    row.charge_level_kwh,
                    row.battery_capacity_kwh,
                    row.charging as i64,
                    row.charger_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO day_summaries \
             (day, total_stored_kwh, active_chargers, rejected_requests, \
              allocated_power, consumed_kwh, delivered_kwh) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.day as i64,
                row.total_stored_kwh,
                row.active_chargers as i64,
                row.rejected_requests as i64,
                row.allocated_power,
                row.consumed_kwh,
                row.delivered_kwh,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
