//! Environment port - abstraction over the grid-world simulation.

use crate::types::{Action, GridPoint, Perception};

/// The world the smartcab drives in.
///
/// The learning core never simulates traffic itself; it senses, acts, and
/// receives rewards through this boundary. Deadline enforcement belongs to
/// the environment: a trial ends when [`Environment::trial_over`] reports
/// true, and the agent is simply not stepped any further.
pub trait Environment {
    /// The fixed action set agents operating in this world may take.
    ///
    /// Supplied once, at agent construction; the default is the full set.
    fn valid_actions(&self) -> &[Action] {
        &Action::ALL
    }

    /// Begin a new trial and return the destination for it.
    fn reset_trial(&mut self) -> GridPoint;

    /// Categorical traffic state at the agent's current intersection.
    fn sense(&self) -> Perception;

    /// Remaining steps before the trial fails its deadline.
    ///
    /// Observability only: the learner excludes the deadline from its state
    /// key, so this feeds step records and nothing else.
    fn deadline(&self) -> i32;

    /// Execute `action`, moving the agent, and return the scalar reward.
    fn act(&mut self, action: Action) -> f64;

    /// Whether the current trial has ended (destination reached, deadline
    /// expired, or aborted).
    fn trial_over(&self) -> bool;

    /// Whether the agent reached its destination in the current trial.
    fn goal_reached(&self) -> bool;
}
