//! Training pipeline driving an agent through the environment ports.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Environment, Observer, RoutePlanner},
    q_learning::LearningAgent,
};

/// Simulation run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Training stops once epsilon falls below this value.
    pub tolerance: f64,

    /// Number of testing trials to run after training completes.
    pub n_test: usize,

    /// Hard cap on training trials. Oscillating decay laws (cos) can hover
    /// above the tolerance indefinitely; the cap bounds the run.
    pub max_trials: usize,

    /// Training trials for a non-learning agent, whose epsilon never decays.
    pub baseline_trials: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            n_test: 0,
            max_trials: 10_000,
            baseline_trials: 20,
        }
    }
}

/// Per-trial observability record: the trial's exploration parameters and
/// the random/total action split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialSummary {
    /// Sequential trial index within the run (0-based).
    pub trial: usize,
    /// True for testing (evaluation) trials.
    pub testing: bool,
    /// Epsilon in effect for this trial.
    pub epsilon: f64,
    /// Alpha in effect for this trial.
    pub alpha: f64,
    /// Time steps driven.
    pub steps: usize,
    /// Sum of rewards received.
    pub total_reward: f64,
    /// Actions taken by the exploration branch.
    pub random_actions: u64,
    /// All actions taken.
    pub total_actions: u64,
    /// Whether the destination was reached.
    pub success: bool,
}

impl TrialSummary {
    /// Fraction of actions that were exploration draws.
    pub fn exploration_ratio(&self) -> f64 {
        if self.total_actions == 0 {
            0.0
        } else {
            self.random_actions as f64 / self.total_actions as f64
        }
    }
}

/// Result of a complete training-plus-testing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Training trials driven.
    pub training_trials: usize,

    /// Testing trials driven.
    pub testing_trials: usize,

    /// Testing trials that reached the destination.
    pub test_successes: usize,

    /// Success rate over testing trials.
    pub test_success_rate: f64,

    /// Epsilon at the end of the run.
    pub final_epsilon: f64,

    /// States materialized in the Q-table.
    pub table_states: usize,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives training and testing trials through the [`Environment`] and
/// [`RoutePlanner`] ports, notifying observers along the way.
///
/// Training runs until the agent's epsilon drops below the configured
/// tolerance (or the trial cap is hit), then the configured number of
/// testing trials run with epsilon and alpha frozen at zero.
pub struct TrainingPipeline {
    config: SimulationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the full training-then-testing schedule.
    pub fn run<E, P>(
        &mut self,
        agent: &mut LearningAgent,
        env: &mut E,
        planner: &mut P,
    ) -> Result<TrainingResult>
    where
        E: Environment,
        P: RoutePlanner,
    {
        for observer in &mut self.observers {
            observer.on_training_start()?;
        }

        let mut trial_num = 0;
        let mut training_trials = 0;

        // Training phase. The stop condition is evaluated after the trial
        // reset, when the decayed epsilon for the upcoming trial is known.
        loop {
            if training_trials >= self.config.max_trials {
                break;
            }
            if !agent.learning() && training_trials >= self.config.baseline_trials {
                break;
            }

            agent.begin_trial(env, planner, false);
            if agent.learning() && agent.epsilon() < self.config.tolerance {
                break;
            }

            self.run_trial(agent, env, planner, trial_num, false)?;
            trial_num += 1;
            training_trials += 1;
        }

        // Testing phase: exploration and learning frozen.
        let mut test_successes = 0;
        for _ in 0..self.config.n_test {
            agent.begin_trial(env, planner, true);
            let summary = self.run_trial(agent, env, planner, trial_num, true)?;
            if summary.success {
                test_successes += 1;
            }
            trial_num += 1;
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let testing_trials = self.config.n_test;
        let test_success_rate = if testing_trials > 0 {
            test_successes as f64 / testing_trials as f64
        } else {
            0.0
        };

        Ok(TrainingResult {
            training_trials,
            testing_trials,
            test_successes,
            test_success_rate,
            final_epsilon: agent.epsilon(),
            table_states: agent.q_table().len(),
        })
    }

    fn run_trial<E, P>(
        &mut self,
        agent: &mut LearningAgent,
        env: &mut E,
        planner: &mut P,
        trial_num: usize,
        testing: bool,
    ) -> Result<TrialSummary>
    where
        E: Environment,
        P: RoutePlanner,
    {
        for observer in &mut self.observers {
            observer.on_trial_start(trial_num, testing)?;
        }

        let mut steps = 0;
        let mut total_reward = 0.0;

        while !env.trial_over() {
            let step = agent.step(env, planner)?;
            total_reward += step.reward;
            steps += 1;

            for observer in &mut self.observers {
                observer.on_step(trial_num, &step)?;
            }
        }

        let (random_actions, total_actions) = agent.exploration_counts();
        let summary = TrialSummary {
            trial: trial_num,
            testing,
            epsilon: agent.epsilon(),
            alpha: agent.alpha(),
            steps,
            total_reward,
            random_actions,
            total_actions,
            success: env.goal_reached(),
        };

        for observer in &mut self.observers {
            observer.on_trial_end(&summary)?;
        }

        Ok(summary)
    }
}
