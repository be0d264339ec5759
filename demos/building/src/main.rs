//! building: one apartment building's EV fleet sharing a handful of
//! breaker-limited chargers.
//!
//! Usage: `building [config.json]`.  Without an argument the default
//! configuration is used (10 chargers, 20 vehicles, 5 breakers, 100 days).
//! Any field missing from the JSON file keeps its default value.
//!
//! Per-vehicle charge levels and daily building totals are written to
//! `output/building/`.  Set `RUST_LOG=ev_sim=debug` to trace every
//! activation and release.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use ev_core::SimConfig;
use ev_output::{CsvWriter, SimOutputObserver};
use ev_sim::EnvironmentBuilder;

const OUTPUT_DIR: &str = "output/building";

fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    info!(
        chargers = config.building.charger_count,
        vehicles = config.building.vehicle_count,
        breakers = config.building.breaker_count,
        days = config.total_days,
        seed = config.seed,
        "building configured"
    );

    let mut env = EnvironmentBuilder::new(config).build()?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    env.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output incomplete");
    }

    let m = env.metrics();
    info!(
        elapsed_s = elapsed.as_secs_f64(),
        stored_kwh = m.total_stored_kwh,
        active_chargers = m.active_chargers,
        rejected = m.rejected_requests,
        output = OUTPUT_DIR,
        "run complete"
    );

    println!("{:<8} {:>10} {:>10} {:<8}", "Vehicle", "Level kWh", "Cap kWh", "Charger");
    println!("{}", "-".repeat(40));
    for v in env.vehicles() {
        let charger = v.bound_charger().map_or_else(|| "-".to_owned(), |c| c.to_string());
        println!(
            "{:<8} {:>10.2} {:>10.2} {:<8}",
            v.id().0,
            v.charge_level(),
            v.battery_capacity(),
            charger,
        );
    }

    Ok(())
}
