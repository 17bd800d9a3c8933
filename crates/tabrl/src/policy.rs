//! Action-selection strategies layered over the greedy estimator
//!
//! The estimator itself is deterministic and pure greedy. Exploration wraps
//! it from the outside so the value table stays reproducible for callers
//! that do not want randomness.

use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::estimator::QLearning;

/// How the training driver picks actions
pub trait ActionSelection<S> {
    /// Choose an action for `state` using the current estimates
    fn select(&mut self, estimator: &mut QLearning<S>, state: &S) -> usize;

    /// Called by the driver once per finished episode
    fn end_episode(&mut self) {}
}

/// Always exploit the current estimates
#[derive(Debug, Default, Clone, Copy)]
pub struct Greedy;

impl<S: Eq + Hash + Clone> ActionSelection<S> for Greedy {
    fn select(&mut self, estimator: &mut QLearning<S>, state: &S) -> usize {
        estimator.select_action(state)
    }
}

/// ε-greedy exploration
///
/// With probability ε a uniform random action is taken, otherwise the greedy
/// one. ε decays multiplicatively at episode boundaries down to a floor.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    decay: f64,
    min_epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Create a policy with entropy-seeded randomness
    pub fn new(epsilon: f64, decay: f64, min_epsilon: f64) -> Self {
        Self {
            epsilon,
            decay,
            min_epsilon,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the RNG with a seeded one for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl<S: Eq + Hash + Clone> ActionSelection<S> for EpsilonGreedy {
    fn select(&mut self, estimator: &mut QLearning<S>, state: &S) -> usize {
        if self.rng.gen::<f64>() < self.epsilon {
            self.rng.gen_range(0..estimator.action_space_size())
        } else {
            estimator.select_action(state)
        }
    }

    fn end_episode(&mut self) {
        self.epsilon = (self.epsilon * self.decay).max(self.min_epsilon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::QLearningConfig;

    fn estimator() -> QLearning<u32> {
        QLearning::new(QLearningConfig {
            learning_rate: 0.1,
            discount_factor: 0.9,
            action_space_size: 4,
        })
        .unwrap()
    }

    #[test]
    fn test_greedy_delegates_to_estimator() {
        let mut q = estimator();
        q.update(&0, 2, 10.0, &1).unwrap();

        let mut policy = Greedy;
        assert_eq!(policy.select(&mut q, &0), 2);
    }

    #[test]
    fn test_epsilon_zero_is_greedy() {
        let mut q = estimator();
        q.update(&0, 3, 10.0, &1).unwrap();

        let mut policy = EpsilonGreedy::new(0.0, 1.0, 0.0).with_seed(7);
        for _ in 0..20 {
            assert_eq!(policy.select(&mut q, &0), 3);
        }
    }

    #[test]
    fn test_epsilon_one_stays_in_range() {
        let mut q = estimator();

        let mut policy = EpsilonGreedy::new(1.0, 1.0, 1.0).with_seed(7);
        for _ in 0..100 {
            let action = policy.select(&mut q, &0);
            assert!(action < q.action_space_size());
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut q1 = estimator();
        let mut q2 = estimator();

        let mut p1 = EpsilonGreedy::new(0.5, 0.99, 0.01).with_seed(42);
        let mut p2 = EpsilonGreedy::new(0.5, 0.99, 0.01).with_seed(42);

        for state in 0..50u32 {
            assert_eq!(p1.select(&mut q1, &state), p2.select(&mut q2, &state));
        }
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let mut policy = EpsilonGreedy::new(0.5, 0.5, 0.1);

        <EpsilonGreedy as ActionSelection<u32>>::end_episode(&mut policy);
        assert_eq!(policy.epsilon(), 0.25);

        for _ in 0..50 {
            <EpsilonGreedy as ActionSelection<u32>>::end_episode(&mut policy);
        }
        assert_eq!(policy.epsilon(), 0.1);
    }
}
