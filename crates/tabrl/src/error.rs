//! Error types for tabrl

use thiserror::Error;

/// Main error type for tabular learning operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("action index {action} out of range for action space of size {action_space_size}")]
    InvalidActionIndex {
        action: usize,
        action_space_size: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("environment error: {0}")]
    Environment(String),
}

/// Result type alias for tabular learning operations
pub type Result<T> = std::result::Result<T, Error>;
