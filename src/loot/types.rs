//! Rarity tiers, difficulty tiers and per-run draw state.

use crate::core::config::{DifficultyMultipliers, LootConfig};
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Most common first.
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Order in which a roll walks the tiers.
    pub const RAREST_FIRST: [Rarity; 4] = [Rarity::Legendary, Rarity::Epic, Rarity::Rare, Rarity::Common];

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Undamped probability of this tier.
    pub fn base_probability(&self, cfg: &LootConfig) -> f64 {
        let weights = &cfg.rarity_weights;
        match self {
            Rarity::Common => weights.common,
            Rarity::Rare => weights.rare,
            Rarity::Epic => weights.epic,
            Rarity::Legendary => weights.legendary,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rarity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Rarity::ALL
            .into_iter()
            .find(|r| r.key() == lowered)
            .ok_or_else(|| ConfigError::UnknownRarity(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Nightmare,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Nightmare => "Nightmare",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Nightmare => "nightmare",
        }
    }

    pub fn multiplier(&self, table: &DifficultyMultipliers) -> f64 {
        match self {
            Difficulty::Easy => table.easy,
            Difficulty::Normal => table.normal,
            Difficulty::Hard => table.hard,
            Difficulty::Nightmare => table.nightmare,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.key() == lowered)
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

/// Counters carried between draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LootDrawState {
    /// Consecutive draws without a drop. Reset by any drop.
    pub kills_since_drop: u32,
    /// Every kill this run. Only grows.
    pub cumulative_kills: u64,
}

impl LootDrawState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result of a single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LootOutcome {
    Drop {
        rarity: Rarity,
        /// Forced by the pity counter rather than rolled.
        pity: bool,
    },
    NoDrop,
}

impl LootOutcome {
    pub fn rarity(&self) -> Option<Rarity> {
        match self {
            LootOutcome::Drop { rarity, .. } => Some(*rarity),
            LootOutcome::NoDrop => None,
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, LootOutcome::Drop { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_parse() {
        assert_eq!("Legendary".parse::<Rarity>().unwrap(), Rarity::Legendary);
        assert_eq!(" epic ".parse::<Rarity>().unwrap(), Rarity::Epic);
        assert!(matches!("mythic".parse::<Rarity>(), Err(ConfigError::UnknownRarity(_))));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("nightmare".parse::<Difficulty>().unwrap(), Difficulty::Nightmare);
        assert!(matches!("brutal".parse::<Difficulty>(), Err(ConfigError::UnknownDifficulty(_))));
    }

    #[test]
    fn test_difficulty_multipliers_ascend() {
        let table = DifficultyMultipliers::default();
        let values: Vec<f64> = Difficulty::ALL.iter().map(|d| d.multiplier(&table)).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_base_probabilities_sum_to_one() {
        let cfg = LootConfig::default();
        let total: f64 = Rarity::ALL.iter().map(|r| r.base_probability(&cfg)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
