//! Episode driver: runs an estimator against an environment
//!
//! The estimator places no bound on episode length or count; bounding both
//! is this driver's job.

use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::env::{Environment, Step};
use crate::error::Result;
use crate::estimator::QLearning;
use crate::policy::ActionSelection;
use crate::types::Transition;

/// Bounds for a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Hard cap on steps within one episode, applied even if the
    /// environment never reports `done`
    pub max_steps_per_episode: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_steps_per_episode: 10_000,
        }
    }
}

/// Summary of a completed training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub episodes: usize,
    pub total_steps: u64,
    pub total_reward: f64,
    pub mean_episode_reward: f64,
    pub states_seen: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Training driver
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Run the configured number of episodes
    ///
    /// Per step: select an action, step the environment, feed the observed
    /// transition back into the estimator, advance the state.
    pub fn run<E, P>(
        &self,
        estimator: &mut QLearning<E::State>,
        env: &mut E,
        selection: &mut P,
    ) -> Result<TrainingReport>
    where
        E: Environment,
        E::State: Eq + Hash + Clone,
        P: ActionSelection<E::State> + ?Sized,
    {
        let started_at = Utc::now();
        let mut total_steps: u64 = 0;
        let mut total_reward = 0.0;

        for episode in 0..self.config.episodes {
            let mut state = env.reset();
            let mut episode_reward = 0.0;

            for _ in 0..self.config.max_steps_per_episode {
                let action = selection.select(estimator, &state);
                let Step {
                    state: next_state,
                    reward,
                    done,
                } = env.step(action)?;

                let transition = Transition::new(state, action, reward, next_state);
                estimator.update_from(&transition)?;

                episode_reward += reward;
                total_steps += 1;
                state = transition.next_state;

                if done {
                    break;
                }
            }

            total_reward += episode_reward;
            selection.end_episode();
            debug!(
                episode,
                episode_reward,
                states_seen = estimator.states_seen(),
                "episode finished"
            );
        }

        let finished_at = Utc::now();
        let mean_episode_reward = if self.config.episodes > 0 {
            total_reward / self.config.episodes as f64
        } else {
            0.0
        };

        let report = TrainingReport {
            episodes: self.config.episodes,
            total_steps,
            total_reward,
            mean_episode_reward,
            states_seen: estimator.states_seen(),
            started_at,
            finished_at,
        };
        info!(
            episodes = report.episodes,
            total_steps = report.total_steps,
            states_seen = report.states_seen,
            "training run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::estimator::QLearningConfig;
    use crate::policy::Greedy;

    /// Two-state loop: action 1 flips the state and pays out, action 0
    /// stays put at a small cost. Episodes end after the payout.
    struct FlipFlop {
        state: u8,
    }

    impl Environment for FlipFlop {
        type State = u8;

        fn reset(&mut self) -> u8 {
            self.state = 0;
            self.state
        }

        fn step(&mut self, action: usize) -> Result<Step<u8>> {
            match action {
                0 => Ok(Step {
                    state: self.state,
                    reward: -0.1,
                    done: false,
                }),
                1 => {
                    self.state ^= 1;
                    Ok(Step {
                        state: self.state,
                        reward: 1.0,
                        done: self.state == 1,
                    })
                }
                other => Err(Error::InvalidActionIndex {
                    action: other,
                    action_space_size: 2,
                }),
            }
        }
    }

    /// Environment that never terminates, to exercise the step cap
    struct Endless;

    impl Environment for Endless {
        type State = u32;

        fn reset(&mut self) -> u32 {
            0
        }

        fn step(&mut self, _action: usize) -> Result<Step<u32>> {
            Ok(Step {
                state: 0,
                reward: -1.0,
                done: false,
            })
        }
    }

    fn estimator(actions: usize) -> QLearning<u8> {
        QLearning::new(QLearningConfig {
            learning_rate: 0.5,
            discount_factor: 0.9,
            action_space_size: actions,
        })
        .unwrap()
    }

    #[test]
    fn test_run_learns_rewarding_action() {
        let mut q = estimator(2);
        let mut env = FlipFlop { state: 0 };
        let trainer = Trainer::new(TrainerConfig {
            episodes: 50,
            max_steps_per_episode: 100,
        });

        let report = trainer.run(&mut q, &mut env, &mut Greedy).unwrap();

        // Only states 0 and 1 exist.
        assert_eq!(report.states_seen, 2);
        assert_eq!(q.select_action(&0), 1);

        let values = q.values(&0).unwrap();
        assert!(values[1] > values[0]);
    }

    #[test]
    fn test_step_cap_bounds_episodes() {
        let mut q = QLearning::new(QLearningConfig {
            learning_rate: 0.5,
            discount_factor: 0.9,
            action_space_size: 1,
        })
        .unwrap();
        let mut env = Endless;
        let trainer = Trainer::new(TrainerConfig {
            episodes: 3,
            max_steps_per_episode: 25,
        });

        let report = trainer.run(&mut q, &mut env, &mut Greedy).unwrap();

        assert_eq!(report.total_steps, 75);
        assert_eq!(report.total_reward, -75.0);
        assert_eq!(report.mean_episode_reward, -25.0);
    }

    #[test]
    fn test_environment_errors_propagate() {
        struct Broken;

        impl Environment for Broken {
            type State = u8;

            fn reset(&mut self) -> u8 {
                0
            }

            fn step(&mut self, _action: usize) -> Result<Step<u8>> {
                Err(Error::Environment("stuck actuator".to_string()))
            }
        }

        let mut q = estimator(2);
        let trainer = Trainer::new(TrainerConfig::default());

        let err = trainer.run(&mut q, &mut Broken, &mut Greedy).unwrap_err();
        assert!(matches!(err, Error::Environment(_)));
    }

    #[test]
    fn test_report_timestamps_ordered() {
        let mut q = estimator(2);
        let mut env = FlipFlop { state: 0 };
        let trainer = Trainer::new(TrainerConfig {
            episodes: 1,
            max_steps_per_episode: 10,
        });

        let report = trainer.run(&mut q, &mut env, &mut Greedy).unwrap();
        assert!(report.finished_at >= report.started_at);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"total_steps\""));
    }

    #[test]
    fn test_zero_episodes_is_a_no_op() {
        let mut q = estimator(2);
        let mut env = FlipFlop { state: 0 };
        let trainer = Trainer::new(TrainerConfig {
            episodes: 0,
            max_steps_per_episode: 10,
        });

        let report = trainer.run(&mut q, &mut env, &mut Greedy).unwrap();
        assert_eq!(report.total_steps, 0);
        assert_eq!(report.mean_episode_reward, 0.0);
        assert_eq!(q.states_seen(), 0);
    }
}
