//! Hash production and storage clamping.

use crate::components::{ComponentId, ComponentLevels};
use crate::core::balance::{base_hash_rate, network_hash_multiplier, storage_capacity};
use crate::core::config::{BalanceConfig, HashEconomyConfig};

/// Result of crediting one production step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionOutcome {
    pub balance: f64,
    /// Hash actually added after clamping.
    pub credited: f64,
    /// True when production was cut off by the storage cap.
    pub capped: bool,
}

/// Hash per second for a producer level, tier and network multiplier,
/// throttled by efficiency. Never negative.
pub fn hash_per_second(
    producer_level: u32,
    tier_multiplier: f64,
    network_multiplier: f64,
    efficiency_percent: f64,
    economy: &HashEconomyConfig,
) -> f64 {
    let efficiency = efficiency_percent.clamp(0.0, 100.0) / 100.0;
    let rate = base_hash_rate(producer_level, economy) * tier_multiplier * network_multiplier * efficiency;
    rate.max(0.0)
}

/// Production rate for a full set of component levels.
pub fn production_rate(
    levels: &ComponentLevels,
    cpu_tier: u32,
    efficiency_percent: f64,
    config: &BalanceConfig,
) -> f64 {
    hash_per_second(
        levels.get(ComponentId::Cpu),
        cpu_tier_multiplier(cpu_tier, &config.hash_economy),
        network_hash_multiplier(levels.get(ComponentId::Network), &config.components),
        efficiency_percent,
        &config.hash_economy,
    )
}

/// Storage cap for the current storage level.
pub fn hash_capacity(levels: &ComponentLevels, config: &BalanceConfig) -> f64 {
    storage_capacity(levels.get(ComponentId::Storage), &config.components)
}

/// Credit `rate * delta_seconds` and clamp to `[0, capacity]`.
///
/// Negative rates produce nothing and negative deltas are treated as zero.
/// Overflow past the cap is discarded.
pub fn apply_production(balance: f64, rate: f64, delta_seconds: f64, capacity: f64) -> ProductionOutcome {
    let earned = rate.max(0.0) * delta_seconds.max(0.0);
    let uncapped = balance + earned;
    let capped = uncapped > capacity;
    let new_balance = uncapped.clamp(0.0, capacity.max(0.0));
    ProductionOutcome {
        balance: new_balance,
        credited: (new_balance - balance).max(0.0),
        capped,
    }
}

/// Earnings for time spent away. Elapsed time is clamped first so the
/// result stops growing after `max_offline_seconds`.
pub fn project_offline_earnings(
    rate: f64,
    offline_rate_fraction: f64,
    elapsed_seconds: f64,
    max_offline_seconds: f64,
) -> f64 {
    let capped_elapsed = elapsed_seconds.clamp(0.0, max_offline_seconds.max(0.0));
    rate.max(0.0) * offline_rate_fraction * capped_elapsed
}

/// Production multiplier for a CPU tier (1-based; clamped to the table).
pub fn cpu_tier_multiplier(tier: u32, economy: &HashEconomyConfig) -> f64 {
    let table = &economy.cpu_tier_multipliers;
    let index = (tier.max(1) as usize - 1).min(table.len().saturating_sub(1));
    table.get(index).copied().unwrap_or(1.0)
}

/// Cost of moving from `tier` to `tier + 1`, or `None` at the top tier.
pub fn next_cpu_tier_cost(tier: u32, economy: &HashEconomyConfig) -> Option<f64> {
    economy.cpu_tier_costs.get(tier.max(1) as usize).copied()
}

/// Seconds until storage is full at a given rate (infinite at zero rate).
pub fn seconds_to_fill(balance: f64, rate: f64, capacity: f64) -> f64 {
    if rate <= 0.0 {
        return f64::INFINITY;
    }
    ((capacity - balance).max(0.0)) / rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rate_no_multipliers() {
        let economy = HashEconomyConfig::default();
        let rate = hash_per_second(1, 1.0, 1.0, 100.0, &economy);
        assert_eq!(rate, economy.base_hash_per_second);
    }

    #[test]
    fn test_zero_efficiency_zero_rate() {
        let economy = HashEconomyConfig::default();
        assert_eq!(hash_per_second(5, 2.0, 1.5, 0.0, &economy), 0.0);
    }

    #[test]
    fn test_efficiency_scales_linearly() {
        let economy = HashEconomyConfig::default();
        let full = hash_per_second(3, 1.0, 1.0, 100.0, &economy);
        let half = hash_per_second(3, 1.0, 1.0, 50.0, &economy);
        assert!((half - full / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_production_caps() {
        let outcome = apply_production(950.0, 10.0, 10.0, 1_000.0);
        assert_eq!(outcome.balance, 1_000.0);
        assert_eq!(outcome.credited, 50.0);
        assert!(outcome.capped);
    }

    #[test]
    fn test_apply_production_under_cap() {
        let outcome = apply_production(0.0, 1.0, 5.0, 1_000.0);
        assert_eq!(outcome.balance, 5.0);
        assert!(!outcome.capped);
    }

    #[test]
    fn test_negative_rate_and_delta_produce_nothing() {
        assert_eq!(apply_production(10.0, -5.0, 3.0, 100.0).balance, 10.0);
        assert_eq!(apply_production(10.0, 5.0, -3.0, 100.0).balance, 10.0);
    }

    #[test]
    fn test_offline_earnings_clamped() {
        let max = 8.0 * 3600.0;
        let at_max = project_offline_earnings(2.0, 0.2, max, max);
        let way_past = project_offline_earnings(2.0, 0.2, max * 100.0, max);
        assert_eq!(at_max, way_past);
        assert!((at_max - 2.0 * 0.2 * max).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_tier_table() {
        let economy = HashEconomyConfig::default();
        assert_eq!(cpu_tier_multiplier(1, &economy), 1.0);
        assert_eq!(cpu_tier_multiplier(99, &economy), *economy.cpu_tier_multipliers.last().unwrap());
        assert_eq!(next_cpu_tier_cost(1, &economy), Some(economy.cpu_tier_costs[1]));
        let top = economy.cpu_tier_costs.len() as u32;
        assert_eq!(next_cpu_tier_cost(top, &economy), None);
    }

    #[test]
    fn test_seconds_to_fill() {
        assert_eq!(seconds_to_fill(0.0, 2.0, 100.0), 50.0);
        assert!(seconds_to_fill(0.0, 0.0, 100.0).is_infinite());
    }
}
