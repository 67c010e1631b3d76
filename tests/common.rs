//! Common test doubles for the smartcab test suite.
//!
//! The crate ships no simulator; these scripted implementations of the
//! environment and planner ports stand in for one.

use smartcab::{
    ports::{Environment, RoutePlanner},
    types::{Action, Direction, GridPoint, Perception, TrafficLight},
};

/// A deterministic environment: every trial lasts a fixed number of steps,
/// every step pays a fixed reward, and the destination is reached iff the
/// script says so.
pub struct ScriptedEnvironment {
    pub trial_length: usize,
    pub reward_per_step: f64,
    pub reach_goal: bool,
    perception: Perception,
    steps_taken: usize,
    pub trials_started: usize,
    pub actions_seen: Vec<Action>,
}

impl ScriptedEnvironment {
    pub fn new(trial_length: usize) -> Self {
        Self {
            trial_length,
            reward_per_step: 1.0,
            reach_goal: true,
            perception: Perception {
                light: TrafficLight::Green,
                left: None,
                right: None,
                oncoming: Some(Direction::Forward),
            },
            steps_taken: 0,
            trials_started: 0,
            actions_seen: Vec::new(),
        }
    }
}

impl Environment for ScriptedEnvironment {
    fn reset_trial(&mut self) -> GridPoint {
        self.steps_taken = 0;
        self.trials_started += 1;
        GridPoint::new(4, 3)
    }

    fn sense(&self) -> Perception {
        self.perception
    }

    fn deadline(&self) -> i32 {
        self.trial_length as i32 - self.steps_taken as i32
    }

    fn act(&mut self, action: Action) -> f64 {
        self.steps_taken += 1;
        self.actions_seen.push(action);
        self.reward_per_step
    }

    fn trial_over(&self) -> bool {
        self.steps_taken >= self.trial_length
    }

    fn goal_reached(&self) -> bool {
        self.reach_goal && self.trial_over()
    }
}

/// A planner that always points forward and records its routed destinations.
pub struct ScriptedPlanner {
    pub destinations: Vec<GridPoint>,
}

impl ScriptedPlanner {
    pub fn new() -> Self {
        Self {
            destinations: Vec::new(),
        }
    }
}

impl Default for ScriptedPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutePlanner for ScriptedPlanner {
    fn route_to(&mut self, destination: GridPoint) {
        self.destinations.push(destination);
    }

    fn next_waypoint(&mut self) -> Option<Direction> {
        Some(Direction::Forward)
    }
}
