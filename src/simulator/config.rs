//! Scenario configuration.

use crate::core::config::BalanceConfig;
use crate::core::error::ConfigError;
use crate::loot::Rarity;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Per-tick decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Never buys anything; rolls for leaks every tick.
    Passive,
    /// Places towers, then buys the cheapest offense/utility upgrade.
    Active,
    /// Saves up for economy upgrades, then towers, then sectors.
    Speedrun,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Passive, Strategy::Active, Strategy::Speedrun];

    pub fn key(&self) -> &'static str {
        match self {
            Strategy::Passive => "passive",
            Strategy::Active => "active",
            Strategy::Speedrun => "speedrun",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.key() == lowered)
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// Configuration for one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioConfig {
    pub strategy: Strategy,
    /// Simulated seconds to run.
    pub duration_seconds: u64,
    /// Seed for leak rolls.
    pub seed: u64,
    /// Rarity of every tower the strategies place.
    pub tower_rarity: Rarity,
}

impl ScenarioConfig {
    pub fn new(strategy: Strategy, duration_seconds: u64, config: &BalanceConfig) -> Self {
        Self {
            strategy,
            duration_seconds,
            seed: config.simulation.default_seed,
            tower_rarity: Rarity::Common,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
