//! Enemy archetypes and their stat blocks.

use crate::core::balance::{threat_damage_multiplier, threat_health_multiplier, threat_speed_multiplier};
use crate::core::config::{EnemyConfig, EnemyStatBlock, ThreatConfig, UnlockThresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyArchetype {
    Basic,
    Fast,
    Swarm,
    Tank,
    Elite,
    Boss,
}

impl EnemyArchetype {
    /// All archetypes in unlock order.
    pub const ALL: [EnemyArchetype; 6] = [
        EnemyArchetype::Basic,
        EnemyArchetype::Fast,
        EnemyArchetype::Swarm,
        EnemyArchetype::Tank,
        EnemyArchetype::Elite,
        EnemyArchetype::Boss,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyArchetype::Basic => "basic",
            EnemyArchetype::Fast => "fast",
            EnemyArchetype::Swarm => "swarm",
            EnemyArchetype::Tank => "tank",
            EnemyArchetype::Elite => "elite",
            EnemyArchetype::Boss => "boss",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|a| a.name() == wanted)
    }

    /// Threat needed before this archetype can appear. Basic is always available.
    pub fn unlock_threshold(&self, thresholds: &UnlockThresholds) -> Option<f64> {
        match self {
            EnemyArchetype::Basic => None,
            EnemyArchetype::Fast => Some(thresholds.fast),
            EnemyArchetype::Swarm => Some(thresholds.swarm),
            EnemyArchetype::Tank => Some(thresholds.tank),
            EnemyArchetype::Elite => Some(thresholds.elite),
            EnemyArchetype::Boss => Some(thresholds.boss),
        }
    }

    pub fn base_stats(&self, enemies: &EnemyConfig) -> EnemyStatBlock {
        match self {
            EnemyArchetype::Basic => enemies.basic,
            EnemyArchetype::Fast => enemies.fast,
            EnemyArchetype::Swarm => enemies.swarm,
            EnemyArchetype::Tank => enemies.tank,
            EnemyArchetype::Elite => enemies.elite,
            EnemyArchetype::Boss => enemies.boss,
        }
    }

    /// Stats after threat scaling. Hash reward is not scaled.
    pub fn stats_at_threat(&self, threat: f64, enemies: &EnemyConfig, cfg: &ThreatConfig) -> EnemyStatBlock {
        let base = self.base_stats(enemies);
        EnemyStatBlock {
            health: base.health * threat_health_multiplier(threat, cfg),
            speed: base.speed * threat_speed_multiplier(threat, cfg),
            damage: base.damage * threat_damage_multiplier(threat, cfg),
            hash_reward: base.hash_reward,
        }
    }
}

/// Look up an enemy's base stats by name.
///
/// Unknown names deliberately fall back to the basic stat block so that new
/// enemy types added on the gameplay side still spawn with sane stats.
pub fn enemy_stats_by_name(name: &str, enemies: &EnemyConfig) -> EnemyStatBlock {
    match EnemyArchetype::from_name(name) {
        Some(archetype) => archetype.base_stats(enemies),
        None => {
            tracing::debug!(name, "unknown enemy type, using basic stats");
            enemies.basic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_enemy_falls_back_to_basic() {
        let enemies = EnemyConfig::default();
        assert_eq!(enemy_stats_by_name("glitch", &enemies), enemies.basic);
        assert_eq!(enemy_stats_by_name("Tank", &enemies), enemies.tank);
    }

    #[test]
    fn test_threat_scales_health_not_reward() {
        let enemies = EnemyConfig::default();
        let cfg = ThreatConfig::default();
        let base = EnemyArchetype::Tank.stats_at_threat(1.0, &enemies, &cfg);
        let scaled = EnemyArchetype::Tank.stats_at_threat(11.0, &enemies, &cfg);

        assert_eq!(base, enemies.tank);
        assert!((scaled.health - enemies.tank.health * (1.0 + 10.0 * cfg.health_scaling)).abs() < 1e-9);
        assert_eq!(scaled.hash_reward, enemies.tank.hash_reward);
    }

    #[test]
    fn test_only_basic_has_no_threshold() {
        let thresholds = UnlockThresholds::default();
        for archetype in EnemyArchetype::ALL {
            assert_eq!(
                archetype.unlock_threshold(&thresholds).is_none(),
                archetype == EnemyArchetype::Basic
            );
        }
    }
}
