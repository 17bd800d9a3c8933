//! Tabular temporal-difference learning
//!
//! This crate provides a tabular action-value estimator together with the
//! pieces a training loop needs around it: an environment interface,
//! exploration policies, and an episode driver.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod env;
pub mod error;
pub mod estimator;
pub mod policy;
pub mod trainer;
pub mod types;

pub use env::{Environment, Step};
pub use error::{Error, Result};
pub use estimator::{QLearning, QLearningConfig};
pub use policy::{ActionSelection, EpsilonGreedy, Greedy};
pub use trainer::{Trainer, TrainerConfig, TrainingReport};
pub use types::{Reward, Transition};
