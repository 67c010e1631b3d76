//! Core domain types for the smartcab world.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A driving action the agent can take at an intersection.
///
/// `Idle` keeps the cab where it is; the other three move it through the
/// intersection relative to its current heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Idle,
    Forward,
    Left,
    Right,
}

impl Action {
    /// Canonical ordering of the full action set.
    pub const ALL: [Action; 4] = [Action::Idle, Action::Forward, Action::Left, Action::Right];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Idle => "idle",
            Action::Forward => "forward",
            Action::Left => "left",
            Action::Right => "right",
        };
        write!(f, "{s}")
    }
}

/// A relative direction of travel through an intersection.
///
/// Used both for the planner's next waypoint and for the declared intent of
/// surrounding traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Forward => "forward",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{s}")
    }
}

/// Traffic light color at the agent's intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLight {
    Red,
    Green,
}

impl fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrafficLight::Red => "red",
            TrafficLight::Green => "green",
        };
        write!(f, "{s}")
    }
}

/// What the environment reports at the agent's current intersection.
///
/// The intent fields carry the direction a vehicle on that approach wants to
/// travel, or `None` when the approach is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perception {
    pub light: TrafficLight,
    pub left: Option<Direction>,
    pub right: Option<Direction>,
    pub oncoming: Option<Direction>,
}

/// The discrete state the learner keys its Q-table on.
///
/// A value type: equality and hashing are by field value, so two visits to
/// the same traffic situation hit the same table entry. The deadline is
/// deliberately excluded — it would explode the state space without adding
/// information the policy can exploit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentState {
    pub waypoint: Option<Direction>,
    pub light: TrafficLight,
    pub left: Option<Direction>,
    pub right: Option<Direction>,
    pub oncoming: Option<Direction>,
}

impl AgentState {
    /// Combine the planner's waypoint with a sensed intersection.
    pub fn new(waypoint: Option<Direction>, perception: Perception) -> Self {
        Self {
            waypoint,
            light: perception.light,
            left: perception.left,
            right: perception.right,
            oncoming: perception.oncoming,
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt(d: Option<Direction>) -> String {
            d.map_or_else(|| "none".to_string(), |d| d.to_string())
        }
        write!(
            f,
            "({}, {}, {}, {}, {})",
            opt(self.waypoint),
            self.light,
            opt(self.left),
            opt(self.right),
            opt(self.oncoming)
        )
    }
}

/// An intersection coordinate in the grid world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
