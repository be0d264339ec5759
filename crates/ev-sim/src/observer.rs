//! Observer trait for progress reporting and data collection.

use ev_core::Day;

use crate::{Environment, StepReport};

/// Callbacks invoked by [`Environment::run`] and
/// [`Environment::run_days`] around each step.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers only ever see `&Environment`, so
/// a collector cannot change simulation state.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, report: &StepReport, _env: &Environment) {
///         if report.day.0 % self.interval == 0 {
///             println!("{}: {} rejections", report.day, report.rejections);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any agent acts.
    fn on_step_start(&mut self, _day: Day) {}

    /// Called at the end of each step with what happened during it and the
    /// state it left behind.
    fn on_step_end(&mut self, _report: &StepReport, _env: &Environment) {}

    /// Called at snapshot intervals (every `config.output_interval_days`).
    ///
    /// `day` is the day that was just simulated.
    fn on_snapshot(&mut self, _day: Day, _env: &Environment) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _final_day: Day) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
