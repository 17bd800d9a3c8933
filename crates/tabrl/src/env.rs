//! Environment interface consumed by the training driver
//!
//! The learning core never defines environment dynamics; callers supply them
//! through this trait.

use crate::error::Result;
use crate::types::Reward;

/// Outcome of a single environment step
#[derive(Debug, Clone)]
pub struct Step<S> {
    /// State the environment transitioned into
    pub state: S,

    /// Reward observed for the step
    pub reward: Reward,

    /// Whether the episode has terminated
    pub done: bool,
}

/// Capability set the training driver expects from an environment
pub trait Environment {
    /// Opaque state identifier produced by this environment
    type State;

    /// Reset to an initial state, starting a new episode
    fn reset(&mut self) -> Self::State;

    /// Apply `action` and observe the resulting transition
    ///
    /// Environments reject actions they cannot interpret, typically with
    /// [`crate::Error::InvalidActionIndex`].
    fn step(&mut self, action: usize) -> Result<Step<Self::State>>;
}
