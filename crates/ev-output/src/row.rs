//! Plain data row types written by output backends.

/// One vehicle's battery state at the end of a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub vehicle_id:           u32,
    pub day:                  u64,
    pub charge_level_kwh:     f64,
    pub battery_capacity_kwh: f64,
    pub charging:             bool,
    /// Bound charger while charging; `u32::MAX` when idle.
    pub charger_id:           u32,
}

/// Building-wide totals at the end of a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummaryRow {
    pub day:               u64,
    pub total_stored_kwh:  f64,
    pub active_chargers:   u64,
    /// Cumulative since the run started.
    pub rejected_requests: u64,
    pub allocated_power:   f64,
    pub consumed_kwh:      f64,
    pub delivered_kwh:     f64,
}
