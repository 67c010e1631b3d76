//! The epsilon-greedy Q-learning driving agent.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    exploration::EpsilonSchedule,
    ports::{Environment, RoutePlanner},
    q_learning::q_table::QTable,
    types::{Action, AgentState, GridPoint},
};

/// Construction-time parameters of the learning agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Whether the agent learns at all. When false the agent drives at
    /// random and its table is never consulted or updated.
    pub learning: bool,
    /// Initial exploration rate. The first trial reset recomputes epsilon
    /// from the decay schedule, so this mostly matters for inspection
    /// before any trial has started.
    pub epsilon: f64,
    /// Learning rate.
    pub alpha: f64,
    /// Epsilon decay schedule applied at each training trial reset.
    pub decay: EpsilonSchedule,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning: false,
            epsilon: 1.0,
            alpha: 0.5,
            decay: EpsilonSchedule::new(crate::exploration::DecayLaw::ConstPower, 0.99),
        }
    }
}

/// Result of one completed time step, for observers and analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StepOutcome {
    pub state: AgentState,
    pub action: Action,
    pub reward: f64,
    /// Steps remaining before the deadline, as reported by the environment
    /// before the action was taken.
    pub deadline: i32,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// A smartcab that learns to drive with a tabular epsilon-greedy policy.
///
/// Owns its Q-table, trial counter, and RNG exclusively; a multi-agent
/// simulation needs one instance per agent, nothing is shared.
///
/// Note the update rule is a deliberate simplification of Q-learning:
/// `Q[s][a] = (1 - alpha) * Q[s][a]`, with no reward or future-value term.
/// See [`LearningAgent::learn`].
#[derive(Debug, Clone)]
pub struct LearningAgent {
    valid_actions: Vec<Action>,
    learning: bool,
    q_table: QTable,
    epsilon: f64,
    alpha: f64,
    configured_alpha: f64,
    decay: EpsilonSchedule,
    /// Training trial counter. Starts at 1: the t-square-reciprocal decay
    /// law divides by `t^2`, so 0 is never a legal value.
    trial: u32,
    random_actions: u64,
    total_actions: u64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

/// Serializable snapshot of a [`LearningAgent`], used by the persistence
/// layer. The RNG itself is not captured, only its seed when one was set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentSnapshot {
    pub valid_actions: Vec<Action>,
    pub learning: bool,
    pub q_table: QTable,
    pub epsilon: f64,
    pub alpha: f64,
    pub configured_alpha: f64,
    pub decay: EpsilonSchedule,
    pub trial: u32,
    pub rng_seed: Option<u64>,
}

impl LearningAgent {
    /// Create a new agent over the given valid-action set.
    ///
    /// The action set is fixed for the lifetime of the agent; every state
    /// materialized in the Q-table gets exactly these actions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyActionSet`] if `valid_actions` is empty.
    pub fn new(config: AgentConfig, valid_actions: &[Action]) -> Result<Self> {
        if valid_actions.is_empty() {
            return Err(Error::EmptyActionSet);
        }
        Ok(Self {
            valid_actions: valid_actions.to_vec(),
            learning: config.learning,
            q_table: QTable::new(),
            epsilon: config.epsilon,
            alpha: config.alpha,
            configured_alpha: config.alpha,
            decay: config.decay,
            trial: 1,
            random_actions: 0,
            total_actions: 0,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    /// Seed the agent's RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Begin a new trial: reset the environment, route the planner to the
    /// new destination, and reset the learner's per-trial state.
    pub fn begin_trial<E, P>(&mut self, env: &mut E, planner: &mut P, testing: bool) -> GridPoint
    where
        E: Environment,
        P: RoutePlanner,
    {
        let destination = env.reset_trial();
        planner.route_to(destination);
        self.reset(testing);
        destination
    }

    /// Per-trial learner reset.
    ///
    /// Testing trials freeze both epsilon and alpha at exactly 0 and leave
    /// the trial counter untouched. Training trials recompute epsilon from
    /// the decay schedule at the current (pre-increment) counter, restore
    /// alpha to its configured value, then advance the counter. The
    /// exploration counters are zeroed either way.
    pub fn reset(&mut self, testing: bool) {
        if testing {
            self.epsilon = 0.0;
            self.alpha = 0.0;
        } else {
            self.epsilon = self.decay.epsilon_at(self.trial);
            self.alpha = self.configured_alpha;
            self.trial += 1;
        }
        self.random_actions = 0;
        self.total_actions = 0;
    }

    /// Materialize `state` in the Q-table with every valid action at 0.0.
    /// No-op if the state already exists.
    pub fn ensure_state(&mut self, state: AgentState) {
        self.q_table.ensure_state(state, &self.valid_actions);
    }

    /// The maximum-valued action for `state`, random among exact ties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateNotSeen`] if the state was never ensured.
    pub fn best_action(&mut self, state: &AgentState) -> Result<(Action, f64)> {
        self.q_table.best_action(state, &mut self.rng)
    }

    /// Epsilon-greedy action selection.
    ///
    /// When learning is disabled the choice is uniformly random regardless
    /// of the table. Otherwise a uniform draw in [0, 1) below the current
    /// epsilon explores (uniform random action), anything else exploits via
    /// [`LearningAgent::best_action`]. The comparison is a raw float
    /// comparison: a cos-law epsilon outside [0, 1] is honored as-is.
    pub fn choose_action(&mut self, state: &AgentState) -> Result<Action> {
        self.total_actions += 1;
        if self.learning {
            if self.rng.random::<f64>() < self.epsilon {
                self.random_actions += 1;
                Ok(self.random_action())
            } else {
                Ok(self.best_action(state)?.0)
            }
        } else {
            Ok(self.random_action())
        }
    }

    /// Apply the value update for an observed `(state, action, reward)`.
    ///
    /// Only has effect when learning is enabled. The rule is
    /// `Q[s][a] = (1 - alpha) * Q[s][a]`: the reward is accepted but not
    /// incorporated, a pure decay toward zero rather than full Q-learning.
    /// This is intentional, not an oversight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateNotSeen`] if the state was never ensured.
    pub fn learn(&mut self, state: &AgentState, action: Action, _reward: f64) -> Result<()> {
        if self.learning {
            self.q_table.decay_value(state, action, self.alpha)?;
        }
        Ok(())
    }

    /// Perform exactly one time step: build the state from the planner and
    /// environment, ensure its table entry, choose an action, execute it,
    /// and apply the learning update.
    pub fn step<E, P>(&mut self, env: &mut E, planner: &mut P) -> Result<StepOutcome>
    where
        E: Environment,
        P: RoutePlanner,
    {
        let waypoint = planner.next_waypoint();
        let perception = env.sense();
        let deadline = env.deadline();

        let state = AgentState::new(waypoint, perception);
        self.ensure_state(state);

        let action = self.choose_action(&state)?;
        let reward = env.act(action);
        self.learn(&state, action, reward)?;

        Ok(StepOutcome {
            state,
            action,
            reward,
            deadline,
        })
    }

    fn random_action(&mut self) -> Action {
        // valid_actions is non-empty by construction
        *self.valid_actions.choose(&mut self.rng).unwrap()
    }

    pub fn learning(&self) -> bool {
        self.learning
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Current training trial counter.
    pub fn trial(&self) -> u32 {
        self.trial
    }

    pub fn valid_actions(&self) -> &[Action] {
        &self.valid_actions
    }

    /// Per-trial (random, total) action counts, for observability.
    pub fn exploration_counts(&self) -> (u64, u64) {
        (self.random_actions, self.total_actions)
    }

    /// Fraction of this trial's actions that were exploration draws.
    pub fn exploration_ratio(&self) -> f64 {
        if self.total_actions == 0 {
            0.0
        } else {
            self.random_actions as f64 / self.total_actions as f64
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub(crate) fn export_state(&self) -> AgentSnapshot {
        AgentSnapshot {
            valid_actions: self.valid_actions.clone(),
            learning: self.learning,
            q_table: self.q_table.clone(),
            epsilon: self.epsilon,
            alpha: self.alpha,
            configured_alpha: self.configured_alpha,
            decay: self.decay,
            trial: self.trial,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: AgentSnapshot) -> Self {
        Self {
            valid_actions: state.valid_actions,
            learning: state.learning,
            q_table: state.q_table,
            epsilon: state.epsilon,
            alpha: state.alpha,
            configured_alpha: state.configured_alpha,
            decay: state.decay,
            trial: state.trial,
            random_actions: 0,
            total_actions: 0,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        }
    }
}
