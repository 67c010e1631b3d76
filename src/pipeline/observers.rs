//! Observer adapters for training pipelines.
//!
//! Observers allow composable data collection during training without
//! coupling the pipeline to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, pipeline::TrialSummary, ports::Observer};

/// Spinner observer - shows live run progress.
///
/// The total trial count is not known up front (training length depends on
/// the decay law and tolerance), so this uses a spinner with a per-trial
/// status message rather than a bounded bar.
pub struct ProgressObserver {
    spinner: Option<ProgressBar>,
    trials: usize,
    successes: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            spinner: None,
            trials: 0,
            successes: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self) -> Result<()> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?,
        );
        self.spinner = Some(pb);
        Ok(())
    }

    fn on_trial_end(&mut self, summary: &TrialSummary) -> Result<()> {
        self.trials += 1;
        if summary.success {
            self.successes += 1;
        }

        if let Some(pb) = &self.spinner {
            let phase = if summary.testing { "test" } else { "train" };
            pb.tick();
            pb.set_message(format!(
                "{phase} trial {} eps={:.4} random={}/{} ({}/{} reached)",
                summary.trial,
                summary.epsilon,
                summary.random_actions,
                summary.total_actions,
                self.successes,
                self.trials,
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.spinner {
            pb.finish_with_message(format!("{}/{} trials reached", self.successes, self.trials));
        }
        Ok(())
    }
}

/// Metrics observer - aggregates run statistics in memory.
pub struct MetricsObserver {
    training_trials: usize,
    testing_trials: usize,
    training_successes: usize,
    testing_successes: usize,
    total_reward: f64,
    total_steps: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            training_trials: 0,
            testing_trials: 0,
            training_successes: 0,
            testing_successes: 0,
            total_reward: 0.0,
            total_steps: 0,
        }
    }

    pub fn training_trials(&self) -> usize {
        self.training_trials
    }

    pub fn testing_trials(&self) -> usize {
        self.testing_trials
    }

    /// Success rate over testing trials.
    pub fn test_success_rate(&self) -> f64 {
        if self.testing_trials == 0 {
            0.0
        } else {
            self.testing_successes as f64 / self.testing_trials as f64
        }
    }

    /// Mean reward per step over the whole run.
    pub fn mean_step_reward(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            self.total_reward / self.total_steps as f64
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_trial_end(&mut self, summary: &TrialSummary) -> Result<()> {
        if summary.testing {
            self.testing_trials += 1;
            if summary.success {
                self.testing_successes += 1;
            }
        } else {
            self.training_trials += 1;
            if summary.success {
                self.training_successes += 1;
            }
        }
        self.total_reward += summary.total_reward;
        self.total_steps += summary.steps;
        Ok(())
    }
}

/// JSONL observer - writes one [`TrialSummary`] JSON object per line.
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| crate::Error::Io {
            operation: format!("create {}", path.as_ref().display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_trial_end(&mut self, summary: &TrialSummary) -> Result<()> {
        serde_json::to_writer(&mut self.writer, summary)?;
        self.writer.write_all(b"\n").map_err(|source| crate::Error::Io {
            operation: "write trial summary".to_string(),
            source,
        })?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| crate::Error::Io {
            operation: "flush trial summaries".to_string(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(testing: bool, success: bool) -> TrialSummary {
        TrialSummary {
            trial: 0,
            testing,
            epsilon: 0.5,
            alpha: 0.5,
            steps: 10,
            total_reward: 4.0,
            random_actions: 3,
            total_actions: 10,
            success,
        }
    }

    #[test]
    fn metrics_observer_splits_training_and_testing() {
        let mut metrics = MetricsObserver::new();
        metrics.on_trial_end(&summary(false, true)).unwrap();
        metrics.on_trial_end(&summary(true, true)).unwrap();
        metrics.on_trial_end(&summary(true, false)).unwrap();

        assert_eq!(metrics.training_trials(), 1);
        assert_eq!(metrics.testing_trials(), 2);
        assert_eq!(metrics.test_success_rate(), 0.5);
        assert!((metrics.mean_step_reward() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn jsonl_observer_writes_one_line_per_trial() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("trials.jsonl");

        let mut observer = JsonlObserver::new(&path).unwrap();
        observer.on_trial_end(&summary(false, true)).unwrap();
        observer.on_trial_end(&summary(true, false)).unwrap();
        observer.on_training_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: TrialSummary = serde_json::from_str(lines[0]).unwrap();
        assert!(!first.testing);
        assert!(first.success);
    }
}
