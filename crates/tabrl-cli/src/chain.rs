//! Deterministic chain-walk demonstration environment
//!
//! States are positions 0..length on a line. Moving right eventually reaches
//! a terminal goal with a positive reward; every other step costs a small
//! penalty. Small enough to inspect by hand, which is the point of the demo.

use tabrl::{Environment, Error, Result, Step};

pub struct ChainWalk {
    length: usize,
    position: usize,
}

impl ChainWalk {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const ACTIONS: usize = 2;

    const STEP_PENALTY: f64 = -0.05;
    const GOAL_REWARD: f64 = 1.0;

    pub fn new(length: usize) -> Self {
        // A chain needs at least a start and a goal.
        Self {
            length: length.max(2),
            position: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Environment for ChainWalk {
    type State = usize;

    fn reset(&mut self) -> usize {
        self.position = 0;
        self.position
    }

    fn step(&mut self, action: usize) -> Result<Step<usize>> {
        match action {
            Self::LEFT => self.position = self.position.saturating_sub(1),
            Self::RIGHT => self.position = (self.position + 1).min(self.length - 1),
            other => {
                return Err(Error::InvalidActionIndex {
                    action: other,
                    action_space_size: Self::ACTIONS,
                })
            }
        }

        let done = self.position == self.length - 1;
        Ok(Step {
            state: self.position,
            reward: if done {
                Self::GOAL_REWARD
            } else {
                Self::STEP_PENALTY
            },
            done,
        })
    }
}
