//! Observer port - abstraction for training observation and data collection.
//!
//! Observers can be composed to collect different kinds of data during a
//! training run without coupling the pipeline to specific output formats.
//! Examples include progress bars for user feedback, JSONL export for
//! analysis, and metric tracking for evaluation.
//!
//! # Event Sequence
//!
//! 1. `on_training_start()` - once at the beginning
//! 2. For each trial:
//!    - `on_trial_start(trial_num, testing)`
//!    - `on_step(trial_num, step)` - for each time step
//!    - `on_trial_end(summary)`
//! 3. `on_training_end()` - once at the end

use crate::{Result, pipeline::TrialSummary, q_learning::StepOutcome};

/// Observer trait for monitoring training.
///
/// Every method has a no-op default so adapters implement only the events
/// they care about.
pub trait Observer: Send {
    /// Called once when the run starts, before any trial.
    fn on_training_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called at the start of each trial.
    ///
    /// `testing` is true for evaluation trials, where exploration and
    /// learning are frozen.
    fn on_trial_start(&mut self, _trial_num: usize, _testing: bool) -> Result<()> {
        Ok(())
    }

    /// Called after each completed time step within a trial.
    fn on_step(&mut self, _trial_num: usize, _step: &StepOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when a trial ends, with its accumulated summary.
    fn on_trial_end(&mut self, _summary: &TrialSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the final trial. Use this to finalize outputs,
    /// flush files, or display totals.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
