//! Hash production, CPU tiers, storage and offline earnings.

use super::Analysis;
use crate::components::ComponentId;
use crate::core::balance::{base_hash_rate, exponential_upgrade_cost, storage_capacity};
use crate::core::config::BalanceConfig;
use crate::economy::{cpu_tier_multiplier, project_offline_earnings, seconds_to_fill};
use crate::simulator::format_duration;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CpuLevelRow {
    pub level: u32,
    pub hash_per_second: f64,
    pub hash_per_hour: f64,
    /// Earnings for a full offline window at this rate.
    pub offline_max: f64,
    /// Cost of the next CPU level, `None` at max.
    pub upgrade_cost: Option<f64>,
    /// Seconds of the added production needed to repay the upgrade.
    pub payback_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierRow {
    pub tier: u32,
    pub multiplier: f64,
    /// Cost to reach this tier from the one below (0 for tier 1).
    pub cost: f64,
    /// Storage level needed before the cost fits in storage.
    pub storage_level_needed: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageRow {
    pub level: u32,
    pub capacity: f64,
    /// Seconds to fill from empty at base production.
    pub fill_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HashAnalysis {
    pub cpu_levels: Vec<CpuLevelRow>,
    pub tiers: Vec<TierRow>,
    pub storage: Vec<StorageRow>,
    pub insights: Vec<String>,
}

/// Lowest storage level whose capacity covers `cost`.
fn storage_level_for(cost: f64, config: &BalanceConfig) -> Option<u32> {
    (1..=config.components.max_level).find(|l| storage_capacity(*l, &config.components) >= cost)
}

impl HashAnalysis {
    pub fn build(config: &BalanceConfig) -> Self {
        let economy = &config.hash_economy;
        let components = &config.components;
        let max_offline = economy.max_offline_seconds();
        let cpu_base = ComponentId::Cpu.base_cost(components);

        let cpu_levels: Vec<CpuLevelRow> = (1..=components.max_level)
            .map(|level| {
                let rate = base_hash_rate(level, economy);
                let upgrade_cost = (level < components.max_level).then(|| exponential_upgrade_cost(cpu_base, level));
                let gain = base_hash_rate(level + 1, economy) - rate;
                CpuLevelRow {
                    level,
                    hash_per_second: rate,
                    hash_per_hour: rate * 3600.0,
                    offline_max: project_offline_earnings(rate, economy.offline_earnings_rate, max_offline, max_offline),
                    upgrade_cost,
                    payback_seconds: upgrade_cost.filter(|_| gain > 0.0).map(|c| c / gain),
                }
            })
            .collect();

        let tiers: Vec<TierRow> = (1..=economy.cpu_tier_multipliers.len() as u32)
            .map(|tier| {
                let cost = economy.cpu_tier_costs.get(tier as usize - 1).copied().unwrap_or(0.0);
                TierRow {
                    tier,
                    multiplier: cpu_tier_multiplier(tier, economy),
                    cost,
                    storage_level_needed: storage_level_for(cost, config),
                }
            })
            .collect();

        let base_rate = base_hash_rate(1, economy);
        let storage: Vec<StorageRow> = (1..=components.max_level)
            .map(|level| {
                let capacity = storage_capacity(level, components);
                StorageRow {
                    level,
                    capacity,
                    fill_seconds: seconds_to_fill(0.0, base_rate, capacity),
                }
            })
            .collect();

        let mut insights = Vec::new();
        let base_capacity = storage_capacity(1, components);
        for tier in tiers.iter().filter(|t| t.cost > base_capacity) {
            match tier.storage_level_needed {
                Some(level) => insights.push(format!(
                    "Can't afford CPU tier {} ({:.0} hash) until Storage L{}",
                    tier.tier, tier.cost, level
                )),
                None => insights.push(format!(
                    "CPU tier {} ({:.0} hash) exceeds max storage and can never be bought",
                    tier.tier, tier.cost
                )),
            }
        }
        if let Some(first) = cpu_levels.first() {
            if first.offline_max > base_capacity {
                insights.push(format!(
                    "A full offline window earns {:.0} hash at CPU L1 but base storage holds {:.0}",
                    first.offline_max, base_capacity
                ));
            }
        }
        if let Some(first_fill) = storage.first() {
            insights.push(format!(
                "Base storage fills in {} at base production",
                format_duration(first_fill.fill_seconds)
            ));
        }

        Self {
            cpu_levels,
            tiers,
            storage,
            insights,
        }
    }
}

impl Analysis for HashAnalysis {
    fn title(&self) -> &'static str {
        "Hash Economy"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str("  CPU   Hash/s    Hash/h   Offline max     Next    Payback\n");
        for row in &self.cpu_levels {
            let next = row.upgrade_cost.map(|c| format!("{:.0}", c)).unwrap_or_else(|| "max".into());
            let payback = row
                .payback_seconds
                .map(format_duration)
                .unwrap_or_else(|| "-".into());
            out.push_str(&format!(
                "  {:>3}  {:>7.2}  {:>8.0}  {:>12.0}  {:>7}  {:>9}\n",
                row.level, row.hash_per_second, row.hash_per_hour, row.offline_max, next, payback
            ));
        }
        out.push('\n');
        out.push_str("  Tier   Mult      Cost   Storage needed\n");
        for row in &self.tiers {
            let needed = row
                .storage_level_needed
                .map(|l| format!("L{}", l))
                .unwrap_or_else(|| "never".into());
            out.push_str(&format!(
                "  {:>4}  {:>5.1}x  {:>8.0}   {}\n",
                row.tier, row.multiplier, row.cost, needed
            ));
        }
        out.push('\n');
        out.push_str("  Storage    Capacity   Fill time\n");
        for row in &self.storage {
            out.push_str(&format!(
                "  {:>7}  {:>10.0}   {}\n",
                row.level,
                row.capacity,
                format_duration(row.fill_seconds)
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_rows_cover_every_level() {
        let config = BalanceConfig::default();
        let analysis = HashAnalysis::build(&config);
        assert_eq!(analysis.cpu_levels.len() as u32, config.components.max_level);
        assert!(analysis.cpu_levels.last().unwrap().upgrade_cost.is_none());
        assert_eq!(analysis.cpu_levels[0].hash_per_second, config.hash_economy.base_hash_per_second);
    }

    #[test]
    fn test_expensive_tier_flags_storage() {
        let config = BalanceConfig::default();
        let analysis = HashAnalysis::build(&config);
        let tier3 = &analysis.tiers[2];
        assert!(tier3.cost > config.components.base_storage_capacity);
        assert!(tier3.storage_level_needed.unwrap() > 1);
        assert!(analysis.insights.iter().any(|i| i.contains("CPU tier 3")));
    }
}
