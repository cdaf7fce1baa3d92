//! Per-run optimizer settings

use gear_core::StatContext;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigError, EstimatorWeights};

/// Inputs supplied by the surrounding system for one optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Simulated fight length in seconds
    #[serde(default = "default_sim_time")]
    pub sim_time: f64,
    /// Enchant names handed to the character builder
    #[serde(default)]
    pub enchants: Vec<String>,
    /// Buff names handed to the character builder
    #[serde(default)]
    pub buffs: Vec<String>,
    #[serde(default)]
    pub weights: EstimatorWeights,
    #[serde(default)]
    pub context: StatContext,
    /// Number of best results kept by the search driver
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        OptimizerSettings {
            sim_time: default_sim_time(),
            enchants: Vec::new(),
            buffs: Vec::new(),
            weights: EstimatorWeights::default(),
            context: StatContext::default(),
            top_k: default_top_k(),
        }
    }
}

impl OptimizerSettings {
    /// Load settings from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let settings: OptimizerSettings = super::load_toml(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let settings: OptimizerSettings = super::parse_toml(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sim_time > 0.0) || !self.sim_time.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "sim_time must be a positive number of seconds, got {}",
                self.sim_time
            )));
        }
        if self.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "top_k must be at least 1".to_string(),
            ));
        }
        if self.context.agility_per_crit < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "context.agility_per_crit must not be negative, got {}",
                self.context.agility_per_crit
            )));
        }
        self.weights.validate()
    }
}

fn default_sim_time() -> f64 {
    60.0
}
fn default_top_k() -> usize {
    10
}
