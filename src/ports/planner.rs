//! Route planner port - abstraction over waypoint computation.

use crate::types::{Direction, GridPoint};

/// Supplies the next waypoint toward the current destination.
///
/// Routing heuristics are out of scope for the learning core; the planner is
/// a black box that turns a destination into a stream of relative directions.
pub trait RoutePlanner {
    /// Set the destination for the upcoming trial.
    fn route_to(&mut self, destination: GridPoint);

    /// The direction the agent should travel next, or `None` when it is
    /// already at the destination.
    fn next_waypoint(&mut self) -> Option<Direction>;
}
