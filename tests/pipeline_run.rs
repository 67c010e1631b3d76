//! End-to-end pipeline runs against scripted port implementations.

mod common;

use std::sync::{Arc, Mutex};

use common::{ScriptedEnvironment, ScriptedPlanner};
use smartcab::{
    AgentConfig, DecayLaw, EpsilonSchedule, LearningAgent, Result, SimulationConfig,
    TrainingPipeline, TrialSummary,
    pipeline::JsonlObserver,
    ports::Observer,
    types::Action,
};

fn learning_agent(law: DecayLaw, constant: f64) -> LearningAgent {
    let config = AgentConfig {
        learning: true,
        epsilon: 1.0,
        alpha: 0.5,
        decay: EpsilonSchedule::new(law, constant),
    };
    LearningAgent::new(config, &Action::ALL).unwrap().with_seed(17)
}

#[test]
fn training_stops_once_epsilon_falls_below_tolerance() {
    // const_power 0.5: trials see epsilon 0.5, 0.25, 0.125, then 0.0625
    // which is below the 0.1 tolerance and stops training.
    let mut agent = learning_agent(DecayLaw::ConstPower, 0.5);
    let mut env = ScriptedEnvironment::new(8);
    let mut planner = ScriptedPlanner::new();

    let config = SimulationConfig {
        tolerance: 0.1,
        n_test: 2,
        ..SimulationConfig::default()
    };
    let result = TrainingPipeline::new(config)
        .run(&mut agent, &mut env, &mut planner)
        .unwrap();

    assert_eq!(result.training_trials, 3);
    assert_eq!(result.testing_trials, 2);
    assert_eq!(result.test_successes, 2);
    assert_eq!(result.test_success_rate, 1.0);
    // Testing trials froze epsilon at exactly zero.
    assert_eq!(result.final_epsilon, 0.0);
    // One fixed traffic situation means one table entry.
    assert_eq!(result.table_states, 1);
}

#[test]
fn max_trials_caps_oscillating_laws() {
    // cos with a tiny constant stays near 1.0 for a long time; the cap is
    // what ends training.
    let mut agent = learning_agent(DecayLaw::Cos, 0.0001);
    let mut env = ScriptedEnvironment::new(2);
    let mut planner = ScriptedPlanner::new();

    let config = SimulationConfig {
        tolerance: 0.05,
        n_test: 0,
        max_trials: 25,
        ..SimulationConfig::default()
    };
    let result = TrainingPipeline::new(config)
        .run(&mut agent, &mut env, &mut planner)
        .unwrap();

    assert_eq!(result.training_trials, 25);
}

#[test]
fn non_learning_agent_runs_baseline_trials() {
    let config = AgentConfig {
        learning: false,
        ..AgentConfig::default()
    };
    let mut agent = LearningAgent::new(config, &Action::ALL).unwrap().with_seed(2);
    let mut env = ScriptedEnvironment::new(4);
    let mut planner = ScriptedPlanner::new();

    let sim = SimulationConfig {
        baseline_trials: 5,
        n_test: 1,
        ..SimulationConfig::default()
    };
    let result = TrainingPipeline::new(sim)
        .run(&mut agent, &mut env, &mut planner)
        .unwrap();

    assert_eq!(result.training_trials, 5);
    assert_eq!(result.testing_trials, 1);
}

#[test]
fn planner_is_routed_once_per_trial() {
    let mut agent = learning_agent(DecayLaw::ConstPower, 0.5);
    let mut env = ScriptedEnvironment::new(3);
    let mut planner = ScriptedPlanner::new();

    let config = SimulationConfig {
        tolerance: 0.1,
        n_test: 2,
        ..SimulationConfig::default()
    };
    TrainingPipeline::new(config)
        .run(&mut agent, &mut env, &mut planner)
        .unwrap();

    // 3 training trials + 1 reset that hit the tolerance check + 2 testing.
    assert_eq!(planner.destinations.len(), 6);
    assert_eq!(env.trials_started, 6);
}

/// Records lifecycle events for assertion.
struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
    summaries: Arc<Mutex<Vec<TrialSummary>>>,
}

impl Observer for RecordingObserver {
    fn on_training_start(&mut self) -> Result<()> {
        self.events.lock().unwrap().push("start".to_string());
        Ok(())
    }

    fn on_trial_start(&mut self, trial_num: usize, testing: bool) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("trial {trial_num} testing={testing}"));
        Ok(())
    }

    fn on_trial_end(&mut self, summary: &TrialSummary) -> Result<()> {
        self.summaries.lock().unwrap().push(summary.clone());
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.events.lock().unwrap().push("end".to_string());
        Ok(())
    }
}

#[test]
fn observers_see_every_lifecycle_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let summaries = Arc::new(Mutex::new(Vec::new()));
    let observer = RecordingObserver {
        events: Arc::clone(&events),
        summaries: Arc::clone(&summaries),
    };

    let mut agent = learning_agent(DecayLaw::ConstPower, 0.5);
    let mut env = ScriptedEnvironment::new(6);
    let mut planner = ScriptedPlanner::new();

    let config = SimulationConfig {
        tolerance: 0.1,
        n_test: 2,
        ..SimulationConfig::default()
    };
    TrainingPipeline::new(config)
        .with_observer(Box::new(observer))
        .run(&mut agent, &mut env, &mut planner)
        .unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.first().map(String::as_str), Some("start"));
    assert_eq!(events.last().map(String::as_str), Some("end"));
    // 3 training + 2 testing trial starts between the bookends.
    assert_eq!(events.len(), 7);

    let summaries = summaries.lock().unwrap();
    assert_eq!(summaries.len(), 5);
    for summary in summaries.iter() {
        // The scripted trial runs exactly 6 steps, and every step chooses
        // exactly one action.
        assert_eq!(summary.steps, 6);
        assert_eq!(summary.total_actions, 6);
        assert!((summary.total_reward - 6.0).abs() < 1e-12);
    }
    for summary in summaries.iter().filter(|s| s.testing) {
        assert_eq!(summary.epsilon, 0.0);
        assert_eq!(summary.alpha, 0.0);
        assert_eq!(summary.random_actions, 0);
    }
}

#[test]
fn jsonl_observer_records_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("run.jsonl");

    let mut agent = learning_agent(DecayLaw::ConstPower, 0.5);
    let mut env = ScriptedEnvironment::new(4);
    let mut planner = ScriptedPlanner::new();

    let config = SimulationConfig {
        tolerance: 0.1,
        n_test: 1,
        ..SimulationConfig::default()
    };
    TrainingPipeline::new(config)
        .with_observer(Box::new(JsonlObserver::new(&path).unwrap()))
        .run(&mut agent, &mut env, &mut planner)
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let summaries: Vec<TrialSummary> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(summaries.len(), 4);
    let testing_flags: Vec<bool> = summaries.iter().map(|s| s.testing).collect();
    assert_eq!(testing_flags, vec![false, false, false, true]);

    // Training epsilons follow const_power 0.5 at t = 1, 2, 3.
    assert!((summaries[0].epsilon - 0.5).abs() < 1e-12);
    assert!((summaries[1].epsilon - 0.25).abs() < 1e-12);
    assert!((summaries[2].epsilon - 0.125).abs() < 1e-12);
}
