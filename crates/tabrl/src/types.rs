//! Shared value types for the learning core

use serde::{Deserialize, Serialize};

/// Reward value from an environment
pub type Reward = f64;

/// A single observed transition (s, a, r, s')
///
/// Transitions are consumed once per update; the estimator never retains
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition<S> {
    pub state: S,
    pub action: usize,
    pub reward: Reward,
    pub next_state: S,
}

impl<S> Transition<S> {
    /// Create a new transition
    pub fn new(state: S, action: usize, reward: Reward, next_state: S) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_creation() {
        let transition = Transition::new("s0", 1, 0.5, "s1");

        assert_eq!(transition.state, "s0");
        assert_eq!(transition.action, 1);
        assert_eq!(transition.reward, 0.5);
        assert_eq!(transition.next_state, "s1");
    }

    #[test]
    fn test_transition_serialization() {
        let transition = Transition::new(3usize, 0, -1.0, 4usize);
        let json = serde_json::to_string(&transition).unwrap();
        let parsed: Transition<usize> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.state, 3);
        assert_eq!(parsed.action, 0);
        assert_eq!(parsed.reward, -1.0);
        assert_eq!(parsed.next_state, 4);
    }
}
