//! Layered settings for the demo trainer
//!
//! Defaults, then an optional TOML file, then `TABRL_*` environment
//! overrides (e.g. `TABRL_TRAINER__EPISODES=500`).

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub estimator: EstimatorSettings,
    pub exploration: ExplorationSettings,
    pub trainer: TrainerSettings,
    pub chain: ChainSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    pub learning_rate: f64,
    pub discount_factor: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.95,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorationSettings {
    pub epsilon: f64,
    pub decay: f64,
    pub min_epsilon: f64,
}

impl Default for ExplorationSettings {
    fn default() -> Self {
        Self {
            epsilon: 0.2,
            decay: 0.995,
            min_epsilon: 0.01,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainerSettings {
    pub episodes: usize,
    pub max_steps_per_episode: usize,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            episodes: 2000,
            max_steps_per_episode: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    pub length: usize,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self { length: 12 }
    }
}

impl Settings {
    /// Assemble settings from defaults, an optional file, and the
    /// environment
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        builder
            .add_source(Environment::with_prefix("TABRL").separator("__"))
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}
