//! Serialization support for trained agents.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::q_learning::agent::{AgentSnapshot, LearningAgent};

/// Summary statistics recorded alongside a saved agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Training trials completed before the save.
    pub training_trials: usize,
    /// Testing trials completed before the save.
    pub testing_trials: usize,
    /// Fraction of testing trials that reached the destination.
    pub test_success_rate: f64,
    /// Free-form note (e.g. the experiment name).
    pub note: Option<String>,
}

/// On-disk representation of a trained agent (MessagePack).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentSnapshot,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &LearningAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
            metadata,
        }
    }

    /// Reconstruct the agent, restoring its table, schedule, counters, and
    /// seeded RNG (when one was set).
    pub fn to_agent(&self) -> Result<LearningAgent> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported agent save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        Ok(LearningAgent::from_state(self.state.clone()))
    }

    /// Number of states in the saved Q-table.
    pub fn table_states(&self) -> usize {
        self.state.q_table.len()
    }

    /// Hyperparameters for display: (learning, epsilon, alpha, trial, decay
    /// law name, decay constant).
    pub fn hyperparameters(&self) -> (bool, f64, f64, u32, &'static str, f64) {
        (
            self.state.learning,
            self.state.epsilon,
            self.state.alpha,
            self.state.trial,
            self.state.decay.law.name(),
            self.state.decay.constant,
        )
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize agent")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize agent")
    }
}
