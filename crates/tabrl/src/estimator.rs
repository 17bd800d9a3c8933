//! Tabular action-value estimation via temporal-difference updates

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{Reward, Transition};

/// Hyperparameters for [`QLearning`], fixed at construction
#[derive(Debug, Clone, Serialize)]
pub struct QLearningConfig {
    /// Step size α, in (0, 1]
    pub learning_rate: f64,

    /// Future-reward weighting γ, in [0, 1]
    pub discount_factor: f64,

    /// Number of discrete actions, constant for the estimator's lifetime
    pub action_space_size: usize,
}

impl QLearningConfig {
    fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(self.discount_factor >= 0.0 && self.discount_factor <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            )));
        }
        if self.action_space_size == 0 {
            return Err(Error::InvalidConfig(
                "action_space_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tabular Q-learning estimator
///
/// Maintains one vector of action-value estimates per observed state and
/// updates them in place from observed transitions:
///
/// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
///
/// States are opaque keys; a state absent from the table is implicitly
/// all-zero and is materialized on first access. The table never shrinks.
///
/// Action selection is pure greedy with a stable first-max tie-break.
/// Exploration is a caller concern, see [`crate::policy`].
#[derive(Debug, Clone)]
pub struct QLearning<S> {
    q_table: HashMap<S, Vec<f64>>,
    learning_rate: f64,
    discount_factor: f64,
    action_space_size: usize,
}

impl<S: Eq + Hash + Clone> QLearning<S> {
    /// Create a new estimator with an empty value table
    pub fn new(config: QLearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: HashMap::new(),
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            action_space_size: config.action_space_size,
        })
    }

    /// First index attaining the maximum estimate
    fn argmax(values: &[f64]) -> usize {
        let mut best = 0;
        for (index, &value) in values.iter().enumerate().skip(1) {
            if value > values[best] {
                best = index;
            }
        }
        best
    }

    /// Zero-initialize the state's estimates if absent, then hand them back
    fn materialize(&mut self, state: &S) -> &mut [f64] {
        self.q_table
            .entry(state.clone())
            .or_insert_with(|| vec![0.0; self.action_space_size])
    }

    /// Greedy action for `state`: the first index attaining the maximum
    /// estimate
    ///
    /// Materializes `state` in the table if it has not been seen before, in
    /// which case all estimates are zero and action 0 is returned.
    pub fn select_action(&mut self, state: &S) -> usize {
        let values = self.materialize(state);
        Self::argmax(values)
    }

    /// Apply one TD(0) update for the transition (state, action, reward,
    /// next_state)
    ///
    /// Both states are materialized if absent. Fails with
    /// [`Error::InvalidActionIndex`] before touching the table when `action`
    /// is outside the action space.
    pub fn update(
        &mut self,
        state: &S,
        action: usize,
        reward: Reward,
        next_state: &S,
    ) -> Result<()> {
        if action >= self.action_space_size {
            return Err(Error::InvalidActionIndex {
                action,
                action_space_size: self.action_space_size,
            });
        }

        let learning_rate = self.learning_rate;
        let discount_factor = self.discount_factor;

        let next_values = self.materialize(next_state);
        let best_next_value = next_values[Self::argmax(next_values)];
        let td_target = reward + discount_factor * best_next_value;

        let values = self.materialize(state);
        let td_error = td_target - values[action];
        values[action] += learning_rate * td_error;

        Ok(())
    }

    /// Apply one TD(0) update from a [`Transition`]
    pub fn update_from(&mut self, transition: &Transition<S>) -> Result<()> {
        self.update(
            &transition.state,
            transition.action,
            transition.reward,
            &transition.next_state,
        )
    }

    /// Action-value estimates for a state, if it has been materialized
    pub fn values(&self, state: &S) -> Option<&[f64]> {
        self.q_table.get(state).map(Vec::as_slice)
    }

    /// Whether a state has been materialized in the table
    pub fn contains(&self, state: &S) -> bool {
        self.q_table.contains_key(state)
    }

    /// Number of materialized states
    pub fn states_seen(&self) -> usize {
        self.q_table.len()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn action_space_size(&self) -> usize {
        self.action_space_size
    }
}
