//! Scaling formulas shared by every model.
//!
//! All functions here are pure: level/wave/threat in, multiplier or stat out.
//! Levels and waves are 1-based; index 0 is treated as 1.

use super::config::{ComponentConfig, HashEconomyConfig, PowerGridConfig, ThreatConfig, WaveConfig};

/// `1 + (step - 1) * per_step`, the linear shape most stats share.
pub fn linear_multiplier(step: u32, per_step: f64) -> f64 {
    1.0 + step.saturating_sub(1) as f64 * per_step
}

// =============================================================================
// WAVE / THREAT
// =============================================================================

pub fn wave_health_multiplier(wave: u32, waves: &WaveConfig) -> f64 {
    linear_multiplier(wave, waves.health_scaling_per_wave)
}

pub fn wave_speed_multiplier(wave: u32, waves: &WaveConfig) -> f64 {
    linear_multiplier(wave, waves.speed_scaling_per_wave)
}

/// `1 + (threat - 1) * scaling`. Threat below 1 never scales stats down.
pub fn threat_stat_multiplier(threat: f64, scaling_constant: f64) -> f64 {
    1.0 + (threat - 1.0).max(0.0) * scaling_constant
}

pub fn threat_health_multiplier(threat: f64, cfg: &ThreatConfig) -> f64 {
    threat_stat_multiplier(threat, cfg.health_scaling)
}

pub fn threat_speed_multiplier(threat: f64, cfg: &ThreatConfig) -> f64 {
    threat_stat_multiplier(threat, cfg.speed_scaling)
}

pub fn threat_damage_multiplier(threat: f64, cfg: &ThreatConfig) -> f64 {
    threat_stat_multiplier(threat, cfg.damage_scaling)
}

// =============================================================================
// LEVELS & COSTS
// =============================================================================

/// Protocol stat multiplier. Level 1 is already 1x, level 5 is 5x.
pub fn level_stat_multiplier(level: u32) -> f64 {
    level.max(1) as f64
}

/// Cost to go from `current_level` to `current_level + 1`.
pub fn exponential_upgrade_cost(base_cost: f64, current_level: u32) -> f64 {
    base_cost * 2f64.powi(current_level.saturating_sub(1) as i32)
}

/// Total cost of upgrading from `from_level` up to `to_level`.
pub fn cumulative_upgrade_cost(base_cost: f64, from_level: u32, to_level: u32) -> f64 {
    (from_level..to_level)
        .map(|level| exponential_upgrade_cost(base_cost, level))
        .sum()
}

// =============================================================================
// COMPONENT SCALERS
// =============================================================================

/// Power budget in watts from the per-level table (clamped to the table).
pub fn power_budget(psu_level: u32, grid: &PowerGridConfig) -> u32 {
    let index = (psu_level.max(1) as usize - 1).min(grid.budget_per_level.len().saturating_sub(1));
    grid.budget_per_level.get(index).copied().unwrap_or(0)
}

pub fn storage_capacity(storage_level: u32, cfg: &ComponentConfig) -> f64 {
    cfg.base_storage_capacity * 2f64.powi(storage_level.saturating_sub(1) as i32)
}

pub fn regen_multiplier(ram_level: u32, cfg: &ComponentConfig) -> f64 {
    linear_multiplier(ram_level, cfg.ram_regen_per_level)
}

pub fn damage_multiplier(gpu_level: u32, cfg: &ComponentConfig) -> f64 {
    linear_multiplier(gpu_level, cfg.gpu_damage_per_level)
}

pub fn attack_speed_multiplier(cache_level: u32, cfg: &ComponentConfig) -> f64 {
    linear_multiplier(cache_level, cfg.cache_attack_speed_per_level)
}

/// Tower slots granted on top of what the power budget supports.
pub fn extra_slots(expansion_level: u32, cfg: &ComponentConfig) -> u32 {
    expansion_level.saturating_sub(1).saturating_mul(cfg.expansion_slots_per_level)
}

pub fn pickup_multiplier(io_level: u32, cfg: &ComponentConfig) -> f64 {
    linear_multiplier(io_level, cfg.io_pickup_per_level)
}

pub fn network_hash_multiplier(network_level: u32, cfg: &ComponentConfig) -> f64 {
    linear_multiplier(network_level, cfg.network_hash_per_level)
}

/// Base hash rate at a CPU level before tier, network and efficiency.
pub fn base_hash_rate(cpu_level: u32, economy: &HashEconomyConfig) -> f64 {
    economy.base_hash_per_second * linear_multiplier(cpu_level, economy.cpu_level_scaling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BalanceConfig;

    #[test]
    fn test_wave_health_first_wave_unscaled() {
        let waves = WaveConfig::default();
        assert_eq!(wave_health_multiplier(1, &waves), 1.0);
    }

    #[test]
    fn test_wave_health_eleventh_wave() {
        let waves = WaveConfig {
            health_scaling_per_wave: 0.15,
            ..WaveConfig::default()
        };
        assert!((wave_health_multiplier(11, &waves) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_threat_multiplier_at_one_is_identity() {
        assert_eq!(threat_stat_multiplier(1.0, 0.15), 1.0);
        assert!((threat_stat_multiplier(11.0, 0.15) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_level_multiplier_equals_level() {
        assert_eq!(level_stat_multiplier(1), 1.0);
        assert_eq!(level_stat_multiplier(7), 7.0);
    }

    #[test]
    fn test_upgrade_cost_doubles() {
        assert_eq!(exponential_upgrade_cost(50.0, 1), 50.0);
        assert_eq!(exponential_upgrade_cost(50.0, 2), 100.0);
        assert_eq!(exponential_upgrade_cost(50.0, 3), 200.0);
    }

    #[test]
    fn test_three_upgrades_from_level_one_cost_350() {
        assert_eq!(cumulative_upgrade_cost(50.0, 1, 4), 350.0);
    }

    #[test]
    fn test_power_budget_uses_table() {
        let config = BalanceConfig::default();
        assert_eq!(power_budget(1, &config.power_grid), 300);
        assert_eq!(power_budget(4, &config.power_grid), 800);
        assert_eq!(power_budget(10, &config.power_grid), 3_000);
        // Past the table stays at the last entry
        assert_eq!(power_budget(15, &config.power_grid), 3_000);
    }

    #[test]
    fn test_storage_capacity_doubles() {
        let cfg = ComponentConfig::default();
        assert_eq!(storage_capacity(1, &cfg), cfg.base_storage_capacity);
        assert_eq!(storage_capacity(3, &cfg), cfg.base_storage_capacity * 4.0);
    }

    #[test]
    fn test_extra_slots_start_at_zero() {
        let cfg = ComponentConfig::default();
        assert_eq!(extra_slots(1, &cfg), 0);
        assert_eq!(extra_slots(4, &cfg), 3 * cfg.expansion_slots_per_level);
    }

    #[test]
    fn test_base_hash_rate_level_one() {
        let economy = HashEconomyConfig::default();
        assert_eq!(base_hash_rate(1, &economy), economy.base_hash_per_second);
    }
}
