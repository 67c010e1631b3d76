//! Q-table implementation for the smartcab learner.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{Action, AgentState},
};

/// Two-level value table: state -> action -> Q-value.
///
/// Invariant: a state is either absent or complete. [`QTable::ensure_state`]
/// materializes every valid action at the baseline value in one step, so no
/// state can ever be partially populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QTable {
    values: HashMap<AgentState, HashMap<Action, f64>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize `state` with every action in `valid_actions` at 0.0.
    ///
    /// Idempotent: an existing entry is left untouched, learned values
    /// included.
    pub fn ensure_state(&mut self, state: AgentState, valid_actions: &[Action]) {
        self.values
            .entry(state)
            .or_insert_with(|| valid_actions.iter().map(|&action| (action, 0.0)).collect());
    }

    /// Whether `state` has been materialized.
    pub fn contains(&self, state: &AgentState) -> bool {
        self.values.contains_key(state)
    }

    /// Q-value for a state-action pair, if the state exists.
    pub fn get(&self, state: &AgentState, action: Action) -> Option<f64> {
        self.values.get(state).and_then(|row| row.get(&action)).copied()
    }

    /// Overwrite the Q-value for a state-action pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateNotSeen`] if the state was never ensured.
    pub fn set(&mut self, state: &AgentState, action: Action, value: f64) -> Result<()> {
        let row = self.row_mut(state)?;
        row.insert(action, value);
        Ok(())
    }

    /// The maximum-valued action for `state`, with a uniform random tie-break.
    ///
    /// Collects every action whose value exactly equals the maximum and draws
    /// one uniformly. A fixed first/last choice would systematically bias the
    /// policy toward one action whenever values tie (as they all do at 0.0
    /// right after a state is created).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateNotSeen`] if the state was never ensured.
    pub fn best_action<R: Rng + ?Sized>(
        &self,
        state: &AgentState,
        rng: &mut R,
    ) -> Result<(Action, f64)> {
        let row = self.row(state)?;

        let max = row
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<(Action, f64)> = row
            .iter()
            .filter(|&(_, &value)| value == max)
            .map(|(&action, &value)| (action, value))
            .collect();

        // ensure_state never inserts an empty row, so `tied` is non-empty.
        let index = rng.random_range(0..tied.len());
        Ok(tied[index])
    }

    /// Decay the value of a state-action pair toward zero:
    /// `Q[s][a] = (1 - alpha) * Q[s][a]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateNotSeen`] if the state was never ensured.
    pub fn decay_value(&mut self, state: &AgentState, action: Action, alpha: f64) -> Result<()> {
        let row = self.row_mut(state)?;
        if let Some(value) = row.get_mut(&action) {
            *value = (1.0 - alpha) * *value;
        }
        Ok(())
    }

    /// Number of materialized states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over materialized states and their action rows.
    pub fn iter(&self) -> impl Iterator<Item = (&AgentState, &HashMap<Action, f64>)> {
        self.values.iter()
    }

    fn row(&self, state: &AgentState) -> Result<&HashMap<Action, f64>> {
        self.values.get(state).ok_or_else(|| Error::StateNotSeen {
            state: state.to_string(),
        })
    }

    fn row_mut(&mut self, state: &AgentState) -> Result<&mut HashMap<Action, f64>> {
        self.values.get_mut(state).ok_or_else(|| Error::StateNotSeen {
            state: state.to_string(),
        })
    }
}
