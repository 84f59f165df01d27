//! Balance configuration.
//!
//! One immutable [`BalanceConfig`] is built at startup (defaults from
//! [`super::constants`], optionally overridden by a TOML file) and passed by
//! reference to every model and to the scenario simulator.

use super::constants::*;
use super::error::{ConfigError, Result};
use crate::waves::CompositionShare;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Tolerance used when checking that rarity probabilities sum to 1.0.
const PROBABILITY_SUM_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashEconomyConfig {
    pub base_hash_per_second: f64,
    pub cpu_level_scaling: f64,
    pub offline_earnings_rate: f64,
    pub max_offline_hours: f64,
    pub cpu_tier_multipliers: Vec<f64>,
    pub cpu_tier_costs: Vec<f64>,
}

impl Default for HashEconomyConfig {
    fn default() -> Self {
        Self {
            base_hash_per_second: BASE_HASH_PER_SECOND,
            cpu_level_scaling: CPU_LEVEL_SCALING,
            offline_earnings_rate: OFFLINE_EARNINGS_RATE,
            max_offline_hours: MAX_OFFLINE_HOURS,
            cpu_tier_multipliers: CPU_TIER_MULTIPLIERS.to_vec(),
            cpu_tier_costs: CPU_TIER_COSTS.to_vec(),
        }
    }
}

impl HashEconomyConfig {
    pub fn max_offline_seconds(&self) -> f64 {
        self.max_offline_hours * 3600.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerPowerConfig {
    pub common: u32,
    pub rare: u32,
    pub epic: u32,
    pub legendary: u32,
}

impl Default for TowerPowerConfig {
    fn default() -> Self {
        Self {
            common: TOWER_POWER_COMMON,
            rare: TOWER_POWER_RARE,
            epic: TOWER_POWER_EPIC,
            legendary: TOWER_POWER_LEGENDARY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerGridConfig {
    /// Budget in watts for each PSU level, index 0 = level 1.
    pub budget_per_level: Vec<u32>,
    pub tower_power: TowerPowerConfig,
    pub placement_base_cost: f64,
    pub placement_cost_per_tower: f64,
}

impl Default for PowerGridConfig {
    fn default() -> Self {
        Self {
            budget_per_level: PSU_POWER_BUDGET.to_vec(),
            tower_power: TowerPowerConfig::default(),
            placement_base_cost: TOWER_PLACEMENT_BASE_COST,
            placement_cost_per_tower: TOWER_PLACEMENT_COST_PER_TOWER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentCosts {
    pub psu: f64,
    pub storage: f64,
    pub ram: f64,
    pub gpu: f64,
    pub cache: f64,
    pub expansion: f64,
    pub io: f64,
    pub network: f64,
    pub cpu: f64,
}

impl Default for ComponentCosts {
    fn default() -> Self {
        Self {
            psu: COMPONENT_COST_PSU,
            storage: COMPONENT_COST_STORAGE,
            ram: COMPONENT_COST_RAM,
            gpu: COMPONENT_COST_GPU,
            cache: COMPONENT_COST_CACHE,
            expansion: COMPONENT_COST_EXPANSION,
            io: COMPONENT_COST_IO,
            network: COMPONENT_COST_NETWORK,
            cpu: COMPONENT_COST_CPU,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    pub max_level: u32,
    pub base_costs: ComponentCosts,
    pub base_storage_capacity: f64,
    pub ram_regen_per_level: f64,
    pub gpu_damage_per_level: f64,
    pub cache_attack_speed_per_level: f64,
    pub expansion_slots_per_level: u32,
    pub io_pickup_per_level: f64,
    pub network_hash_per_level: f64,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            max_level: COMPONENT_MAX_LEVEL,
            base_costs: ComponentCosts::default(),
            base_storage_capacity: BASE_STORAGE_CAPACITY,
            ram_regen_per_level: RAM_REGEN_PER_LEVEL,
            gpu_damage_per_level: GPU_DAMAGE_PER_LEVEL,
            cache_attack_speed_per_level: CACHE_ATTACK_SPEED_PER_LEVEL,
            expansion_slots_per_level: EXPANSION_SLOTS_PER_LEVEL,
            io_pickup_per_level: IO_PICKUP_PER_LEVEL,
            network_hash_per_level: NETWORK_HASH_PER_LEVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyConfig {
    pub loss_per_leak: f64,
    pub leak_decay_interval: f64,
    pub warning_threshold: f64,
    pub leak_chance_per_threat: f64,
    pub max_leak_chance: f64,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            loss_per_leak: EFFICIENCY_LOSS_PER_LEAK,
            leak_decay_interval: LEAK_DECAY_INTERVAL_SECONDS,
            warning_threshold: EFFICIENCY_WARNING_THRESHOLD,
            leak_chance_per_threat: LEAK_CHANCE_PER_THREAT,
            max_leak_chance: MAX_LEAK_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnlockThresholds {
    pub fast: f64,
    pub swarm: f64,
    pub tank: f64,
    pub elite: f64,
    pub boss: f64,
}

impl Default for UnlockThresholds {
    fn default() -> Self {
        Self {
            fast: THREAT_UNLOCK_FAST,
            swarm: THREAT_UNLOCK_SWARM,
            tank: THREAT_UNLOCK_TANK,
            elite: THREAT_UNLOCK_ELITE,
            boss: THREAT_UNLOCK_BOSS,
        }
    }
}

impl UnlockThresholds {
    pub fn as_array(&self) -> [f64; 5] {
        [self.fast, self.swarm, self.tank, self.elite, self.boss]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    pub starting_threat: f64,
    pub max_threat: f64,
    pub growth_per_second: f64,
    pub offline_fraction: f64,
    pub unlock_thresholds: UnlockThresholds,
    pub health_scaling: f64,
    pub speed_scaling: f64,
    pub damage_scaling: f64,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            starting_threat: STARTING_THREAT,
            max_threat: MAX_THREAT,
            growth_per_second: THREAT_GROWTH_PER_SECOND,
            offline_fraction: OFFLINE_THREAT_FRACTION,
            unlock_thresholds: UnlockThresholds::default(),
            health_scaling: THREAT_HEALTH_SCALING,
            speed_scaling: THREAT_SPEED_SCALING,
            damage_scaling: THREAT_DAMAGE_SCALING,
        }
    }
}

/// Base stats for one enemy archetype before any scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStatBlock {
    pub health: f64,
    pub speed: f64,
    pub damage: f64,
    pub hash_reward: f64,
}

impl From<(f64, f64, f64, f64)> for EnemyStatBlock {
    fn from((health, speed, damage, hash_reward): (f64, f64, f64, f64)) -> Self {
        Self {
            health,
            speed,
            damage,
            hash_reward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub basic: EnemyStatBlock,
    pub fast: EnemyStatBlock,
    pub swarm: EnemyStatBlock,
    pub tank: EnemyStatBlock,
    pub elite: EnemyStatBlock,
    pub boss: EnemyStatBlock,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            basic: ENEMY_BASIC_STATS.into(),
            fast: ENEMY_FAST_STATS.into(),
            swarm: ENEMY_SWARM_STATS.into(),
            tank: ENEMY_TANK_STATS.into(),
            elite: ENEMY_ELITE_STATS.into(),
            boss: ENEMY_BOSS_STATS.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_enemy_count: u32,
    pub enemies_per_wave: u32,
    pub health_scaling_per_wave: f64,
    pub speed_scaling_per_wave: f64,
    pub boss_interval: u32,
    pub boss_health_multiplier: f64,
    pub boss_speed_multiplier: f64,
    pub base_spawn_delay: f64,
    pub min_spawn_delay: f64,
    pub spawn_delay_reduction: f64,
    pub hash_bonus_per_wave: f64,
    /// Ascending by `from_wave`; the last bracket covers every later wave.
    pub brackets: Vec<WaveBracket>,
}

/// Archetype mix used from `from_wave` until the next bracket starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveBracket {
    pub from_wave: u32,
    pub shares: Vec<CompositionShare>,
}

impl WaveBracket {
    pub fn total_fraction(&self) -> f64 {
        self.shares.iter().map(|s| s.fraction).sum()
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_enemy_count: WAVE_BASE_ENEMY_COUNT,
            enemies_per_wave: WAVE_ENEMIES_PER_WAVE,
            health_scaling_per_wave: WAVE_HEALTH_SCALING,
            speed_scaling_per_wave: WAVE_SPEED_SCALING,
            boss_interval: WAVE_BOSS_INTERVAL,
            boss_health_multiplier: WAVE_BOSS_HEALTH_MULTIPLIER,
            boss_speed_multiplier: WAVE_BOSS_SPEED_MULTIPLIER,
            base_spawn_delay: WAVE_BASE_SPAWN_DELAY,
            min_spawn_delay: WAVE_MIN_SPAWN_DELAY,
            spawn_delay_reduction: WAVE_SPAWN_DELAY_REDUCTION,
            hash_bonus_per_wave: WAVE_HASH_BONUS_PER_WAVE,
            brackets: WAVE_BRACKETS
                .iter()
                .map(|(from_wave, shares)| WaveBracket {
                    from_wave: *from_wave,
                    shares: shares
                        .iter()
                        .map(|&(archetype, fraction)| CompositionShare { archetype, fraction })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub common: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: LOOT_COMMON_PROBABILITY,
            rare: LOOT_RARE_PROBABILITY,
            epic: LOOT_EPIC_PROBABILITY,
            legendary: LOOT_LEGENDARY_PROBABILITY,
        }
    }
}

impl RarityWeights {
    pub fn total(&self) -> f64 {
        self.common + self.rare + self.epic + self.legendary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyMultipliers {
    pub easy: f64,
    pub normal: f64,
    pub hard: f64,
    pub nightmare: f64,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self {
            easy: LOOT_DIFFICULTY_EASY,
            normal: LOOT_DIFFICULTY_NORMAL,
            hard: LOOT_DIFFICULTY_HARD,
            nightmare: LOOT_DIFFICULTY_NIGHTMARE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    pub rarity_weights: RarityWeights,
    pub diminishing_factor: f64,
    pub pity_threshold: u32,
    pub difficulty: DifficultyMultipliers,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            rarity_weights: RarityWeights::default(),
            diminishing_factor: LOOT_DIMINISHING_FACTOR,
            pity_threshold: LOOT_PITY_THRESHOLD,
            difficulty: DifficultyMultipliers::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolScalingConfig {
    pub max_level: u32,
    pub range_per_level: f64,
    pub fire_rate_per_level: f64,
}

impl Default for ProtocolScalingConfig {
    fn default() -> Self {
        Self {
            max_level: PROTOCOL_MAX_LEVEL,
            range_per_level: PROTOCOL_RANGE_PER_LEVEL,
            fire_rate_per_level: PROTOCOL_FIRE_RATE_PER_LEVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CyberbossConfig {
    pub base_health: f64,
    /// Health fractions at which phases 2, 3 and 4 begin. Strictly descending.
    pub phase_thresholds: [f64; 3],
}

impl Default for CyberbossConfig {
    fn default() -> Self {
        Self {
            base_health: CYBERBOSS_BASE_HEALTH,
            phase_thresholds: [
                CYBERBOSS_PHASE2_THRESHOLD,
                CYBERBOSS_PHASE3_THRESHOLD,
                CYBERBOSS_PHASE4_THRESHOLD,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeroDayConfig {
    pub base_health: f64,
    pub speed: f64,
    pub efficiency_drain_rate: f64,
    pub min_waves_before_spawn: u32,
    pub defeat_hash_bonus: f64,
    pub defeat_efficiency_restore: f64,
}

impl Default for ZeroDayConfig {
    fn default() -> Self {
        Self {
            base_health: ZERO_DAY_BASE_HEALTH,
            speed: ZERO_DAY_SPEED,
            efficiency_drain_rate: ZERO_DAY_EFFICIENCY_DRAIN,
            min_waves_before_spawn: ZERO_DAY_MIN_WAVES,
            defeat_hash_bonus: ZERO_DAY_DEFEAT_HASH_BONUS,
            defeat_efficiency_restore: ZERO_DAY_DEFEAT_EFFICIENCY_RESTORE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BossConfig {
    pub cyberboss: CyberbossConfig,
    pub zero_day: ZeroDayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_seconds: f64,
    pub report_interval_seconds: u64,
    pub default_seed: u64,
    pub sector_unlock_costs: Vec<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_seconds: SIM_TICK_SECONDS,
            report_interval_seconds: SIM_REPORT_INTERVAL_SECONDS,
            default_seed: SIM_DEFAULT_SEED,
            sector_unlock_costs: SECTOR_UNLOCK_COSTS.to_vec(),
        }
    }
}

/// Every balance tunable, grouped by the model that reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BalanceConfig {
    pub hash_economy: HashEconomyConfig,
    pub power_grid: PowerGridConfig,
    pub components: ComponentConfig,
    pub efficiency: EfficiencyConfig,
    pub threat: ThreatConfig,
    pub enemies: EnemyConfig,
    pub waves: WaveConfig,
    pub loot: LootConfig,
    pub protocols: ProtocolScalingConfig,
    pub bosses: BossConfig,
    pub simulation: SimulationConfig,
}

impl BalanceConfig {
    /// Parses a (possibly partial) TOML override and validates the result.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BalanceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML override file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Rejects configurations that would make the models meaningless.
    pub fn validate(&self) -> Result<()> {
        let components = &self.components;
        if components.max_level == 0 {
            return Err(invalid("components.max_level must be at least 1"));
        }
        if self.power_grid.budget_per_level.len() != components.max_level as usize {
            return Err(invalid(format!(
                "power_grid.budget_per_level has {} entries, expected {}",
                self.power_grid.budget_per_level.len(),
                components.max_level
            )));
        }

        let economy = &self.hash_economy;
        if economy.cpu_tier_multipliers.is_empty()
            || economy.cpu_tier_multipliers.len() != economy.cpu_tier_costs.len()
        {
            return Err(invalid(
                "hash_economy.cpu_tier_multipliers and cpu_tier_costs must be non-empty and equal length",
            ));
        }
        if !(0.0..=1.0).contains(&economy.offline_earnings_rate) {
            return Err(invalid("hash_economy.offline_earnings_rate must be within [0, 1]"));
        }

        let weights = &self.loot.rarity_weights;
        if (weights.total() - 1.0).abs() > PROBABILITY_SUM_EPSILON {
            return Err(invalid(format!(
                "loot.rarity_weights sum to {:.6}, expected 1.0",
                weights.total()
            )));
        }
        if self.loot.pity_threshold == 0 {
            return Err(invalid("loot.pity_threshold must be at least 1"));
        }

        let thresholds = self.threat.unlock_thresholds.as_array();
        if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(invalid("threat.unlock_thresholds must be strictly ascending"));
        }
        if !(0.0..=1.0).contains(&self.threat.offline_fraction) {
            return Err(invalid("threat.offline_fraction must be within [0, 1]"));
        }
        if self.threat.max_threat < self.threat.starting_threat {
            return Err(invalid("threat.max_threat is below threat.starting_threat"));
        }

        let phases = self.bosses.cyberboss.phase_thresholds;
        let phases_descending = phases.windows(2).all(|pair| pair[0] > pair[1]);
        let phases_in_range = phases.iter().all(|p| *p > 0.0 && *p < 1.0);
        if !phases_descending || !phases_in_range {
            return Err(invalid(
                "bosses.cyberboss.phase_thresholds must be strictly descending within (0, 1)",
            ));
        }

        if self.waves.boss_interval == 0 {
            return Err(invalid("waves.boss_interval must be at least 1"));
        }
        let brackets = &self.waves.brackets;
        if brackets.first().map_or(true, |b| b.from_wave > 1) {
            return Err(invalid("waves.brackets must start at wave 1"));
        }
        if brackets.windows(2).any(|pair| pair[0].from_wave >= pair[1].from_wave) {
            return Err(invalid("waves.brackets must be strictly ascending by from_wave"));
        }
        for bracket in brackets {
            let negative = bracket.shares.iter().any(|s| s.fraction < 0.0);
            if negative || (bracket.total_fraction() - 1.0).abs() > PROBABILITY_SUM_EPSILON {
                return Err(invalid(format!(
                    "waves.brackets entry at wave {} must have non-negative fractions summing to 1.0",
                    bracket.from_wave
                )));
            }
        }
        if self.simulation.tick_seconds <= 0.0 || self.simulation.report_interval_seconds == 0 {
            return Err(invalid("simulation tick and report intervals must be positive"));
        }

        Ok(())
    }

    /// Nested camel-case export compared by external tooling.
    pub fn export_json(&self) -> serde_json::Value {
        let costs = &self.components.base_costs;
        let tower = &self.power_grid.tower_power;
        let cyberboss = &self.bosses.cyberboss;
        let zero_day = &self.bosses.zero_day;
        json!({
            "powerGrid": {
                "basePowerBudget": self.power_grid.budget_per_level.first().copied().unwrap_or(0),
                "budgetPerLevel": self.power_grid.budget_per_level,
                "towerPower": {
                    "common": tower.common,
                    "rare": tower.rare,
                    "epic": tower.epic,
                    "legendary": tower.legendary,
                },
            },
            "threatLevel": {
                "healthScaling": self.threat.health_scaling,
                "speedScaling": self.threat.speed_scaling,
                "damageScaling": self.threat.damage_scaling,
                "growthPerSecond": self.threat.growth_per_second,
                "offlineFraction": self.threat.offline_fraction,
                "maxThreat": self.threat.max_threat,
            },
            "bosses": {
                "cyberboss": {
                    "baseHealth": cyberboss.base_health,
                    "phase2Threshold": cyberboss.phase_thresholds[0],
                    "phase3Threshold": cyberboss.phase_thresholds[1],
                    "phase4Threshold": cyberboss.phase_thresholds[2],
                },
            },
            "zeroDay": {
                "baseHealth": zero_day.base_health,
                "speed": zero_day.speed,
                "efficiencyDrainRate": zero_day.efficiency_drain_rate,
                "minWavesBeforeSpawn": zero_day.min_waves_before_spawn,
                "defeatHashBonus": zero_day.defeat_hash_bonus,
                "defeatEfficiencyRestore": zero_day.defeat_efficiency_restore,
            },
            "hashEconomy": {
                "baseHashPerSecond": self.hash_economy.base_hash_per_second,
                "cpuLevelScaling": self.hash_economy.cpu_level_scaling,
                "maxOfflineHours": self.hash_economy.max_offline_hours,
                "offlineEarningsRate": self.hash_economy.offline_earnings_rate,
            },
            "protocolScaling": {
                "rangePerLevel": self.protocols.range_per_level,
                "fireRatePerLevel": self.protocols.fire_rate_per_level,
            },
            "components": {
                "maxLevel": self.components.max_level,
                "baseCosts": {
                    "psu": costs.psu,
                    "ram": costs.ram,
                    "gpu": costs.gpu,
                    "cache": costs.cache,
                    "storage": costs.storage,
                    "expansion": costs.expansion,
                    "network": costs.network,
                    "io": costs.io,
                    "cpu": costs.cpu,
                },
            },
            "efficiency": {
                "leakDecayInterval": self.efficiency.leak_decay_interval,
                "warningThreshold": self.efficiency.warning_threshold,
                "lossPerLeak": self.efficiency.loss_per_leak,
            },
        })
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
