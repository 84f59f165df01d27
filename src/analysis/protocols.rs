//! Protocol scaling tables.

use super::Analysis;
use crate::core::config::BalanceConfig;
use crate::economy::tower_power_draw;
use crate::loot::Rarity;
use crate::protocols::{cost_to_max, dps_per_watt, protocol_stats, ProtocolKind, ProtocolStats};
use serde::Serialize;

/// Levels printed in the text table.
const SAMPLE_LEVELS: [u32; 4] = [1, 3, 5, 10];

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolRow {
    pub protocol: &'static str,
    pub rarity: Rarity,
    pub power_draw: u32,
    pub levels: Vec<ProtocolStats>,
    pub cost_to_max: f64,
    pub dps_per_watt: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolAnalysis {
    pub rows: Vec<ProtocolRow>,
    pub insights: Vec<String>,
}

impl ProtocolAnalysis {
    pub fn build(config: &BalanceConfig) -> Self {
        let scaling = &config.protocols;
        let rows: Vec<ProtocolRow> = ProtocolKind::ALL
            .iter()
            .map(|kind| ProtocolRow {
                protocol: kind.name(),
                rarity: kind.rarity(),
                power_draw: tower_power_draw(kind.rarity(), &config.power_grid),
                levels: (1..=scaling.max_level).map(|l| protocol_stats(*kind, l, scaling)).collect(),
                cost_to_max: cost_to_max(*kind, scaling),
                dps_per_watt: dps_per_watt(*kind, 1, config),
            })
            .collect();

        let mut insights = Vec::new();
        if let Some(best) = rows.iter().max_by(|a, b| a.dps_per_watt.total_cmp(&b.dps_per_watt)) {
            insights.push(format!(
                "{} has the best DPS per watt at L1 ({:.3})",
                best.protocol, best.dps_per_watt
            ));
        }
        let capacity = config.components.base_storage_capacity;
        for row in &rows {
            if row.cost_to_max > capacity * 16.0 {
                insights.push(format!(
                    "Maxing {} costs {:.0} hash, over 16x base storage",
                    row.protocol, row.cost_to_max
                ));
            }
        }

        Self { rows, insights }
    }
}

impl Analysis for ProtocolAnalysis {
    fn title(&self) -> &'static str {
        "Protocols"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str("  Protocol          Rarity     Lvl   Damage   Range   Rate     DPS    Next\n");
        for row in &self.rows {
            for stats in row.levels.iter().filter(|s| SAMPLE_LEVELS.contains(&s.level)) {
                let next = stats
                    .upgrade_cost
                    .map(|c| format!("{:.0}", c))
                    .unwrap_or_else(|| "max".to_string());
                out.push_str(&format!(
                    "  {:<16}  {:<9}  {:>3}  {:>7.1}  {:>6.1}  {:>5.2}  {:>6.1}  {:>6}\n",
                    row.protocol,
                    row.rarity.name(),
                    stats.level,
                    stats.damage,
                    stats.range,
                    stats.fire_rate,
                    stats.dps,
                    next
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_row_per_protocol() {
        let analysis = ProtocolAnalysis::build(&BalanceConfig::default());
        assert_eq!(analysis.rows.len(), ProtocolKind::ALL.len());
        assert!(analysis.rows.iter().all(|r| r.levels.len() == 10));
        assert!(!analysis.insights.is_empty());
    }

    #[test]
    fn test_dps_grows_with_level() {
        let analysis = ProtocolAnalysis::build(&BalanceConfig::default());
        for row in &analysis.rows {
            assert!(row.levels.windows(2).all(|w| w[1].dps > w[0].dps));
        }
    }
}
