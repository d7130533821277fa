//! Engine configuration
//!
//! All sections default sensibly, so a YAML file only needs the keys it
//! changes:
//!
//! ```yaml
//! growth:
//!   max_referrals_per_user: 10
//!   initial_cohort: 1
//! bonus:
//!   max_bonus: 10000
//! stats:
//!   top_referrers_limit: 10
//!   influencer_limit: 5
//! ```

use referral_optimization::{BonusConfig, GrowthConfig, OptimizationError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid growth config: {0}")]
    Growth(#[from] OptimizationError),

    #[error("Invalid stats config: {0}")]
    Stats(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Sizes of the ranked lists in network statistics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Entries in `top_referrers`
    pub top_referrers_limit: usize,
    /// Entries in `unique_influencers` and `flow_influencers`
    pub influencer_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_referrers_limit: 10,
            influencer_limit: 5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub growth: GrowthConfig,
    pub bonus: BonusConfig,
    pub stats: StatsConfig,
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading engine config from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.growth.validate()?;
        if self.stats.top_referrers_limit == 0 {
            return Err(ConfigError::Stats(
                "top_referrers_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
