//! Smartcab: a tabular Q-learning driving agent
//!
//! This crate provides:
//! - An epsilon-greedy Q-table learner with a uniform random tie-break
//! - Four epsilon decay laws selectable at construction time
//! - Port traits for the environment, route planner, and training observers
//! - A training pipeline with tolerance-based stopping and testing trials
//! - Agent persistence and CLI tooling for inspection and schedule export
//!
//! The grid-world simulation itself lives outside this crate, behind the
//! [`ports::Environment`] and [`ports::RoutePlanner`] traits.

pub mod cli;
pub mod error;
pub mod exploration;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use exploration::{DecayLaw, EpsilonSchedule};
pub use pipeline::{SimulationConfig, TrainingPipeline, TrainingResult, TrialSummary};
pub use q_learning::{AgentConfig, LearningAgent, QTable, SavedAgent, StepOutcome};
pub use types::{Action, AgentState, Direction, GridPoint, Perception, TrafficLight};
