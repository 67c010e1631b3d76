//! Tabular epsilon-greedy Q-learning for the smartcab.
//!
//! The learner keeps a two-level value table keyed by the discrete traffic
//! state, selects actions epsilon-greedily against it, and decays visited
//! entries after each reward. The exploration rate follows a configurable
//! decay schedule (see [`crate::exploration`]).
//!
//! ## Usage Example
//!
//! ```no_run
//! use smartcab::{
//!     exploration::{DecayLaw, EpsilonSchedule},
//!     q_learning::{AgentConfig, LearningAgent},
//!     types::Action,
//! };
//!
//! let config = AgentConfig {
//!     learning: true,
//!     epsilon: 1.0,
//!     alpha: 0.5,
//!     decay: EpsilonSchedule::new(DecayLaw::Cos, 0.0015),
//! };
//! let agent = LearningAgent::new(config, &Action::ALL).unwrap();
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{AgentConfig, LearningAgent, StepOutcome};
pub use q_table::QTable;
pub use serialization::{SavedAgent, TrainingMetadata};
