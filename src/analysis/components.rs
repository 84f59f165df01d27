//! Upgrade cost curves for the nine components.

use super::Analysis;
use crate::components::{total_cost_all_components, total_cost_to_max, ComponentId, ComponentRole};
use crate::core::balance::{base_hash_rate, exponential_upgrade_cost, storage_capacity};
use crate::core::config::BalanceConfig;
use crate::simulator::format_duration;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentRow {
    pub component: ComponentId,
    pub name: &'static str,
    pub role: ComponentRole,
    pub stat: &'static str,
    /// Cost to go from level `i + 1` to `i + 2`.
    pub level_costs: Vec<f64>,
    pub cost_to_max: f64,
    pub value_at_min: f64,
    pub value_at_max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentAnalysis {
    pub rows: Vec<ComponentRow>,
    pub total_cost: f64,
    /// Seconds of base production needed to max everything.
    pub seconds_at_base_rate: f64,
    pub insights: Vec<String>,
}

impl ComponentAnalysis {
    pub fn build(config: &BalanceConfig) -> Self {
        let cfg = &config.components;
        let rows: Vec<ComponentRow> = ComponentId::ALL
            .iter()
            .map(|id| {
                let base = id.base_cost(cfg);
                ComponentRow {
                    component: *id,
                    name: id.name(),
                    role: id.role(),
                    stat: id.stat_label(),
                    level_costs: (1..cfg.max_level).map(|l| exponential_upgrade_cost(base, l)).collect(),
                    cost_to_max: total_cost_to_max(*id, cfg),
                    value_at_min: id.value_at(1, config),
                    value_at_max: id.value_at(cfg.max_level, config),
                }
            })
            .collect();

        let total_cost = total_cost_all_components(cfg);
        let rate = base_hash_rate(1, &config.hash_economy);
        let seconds_at_base_rate = if rate > 0.0 { total_cost / rate } else { f64::INFINITY };

        let mut insights = vec![format!(
            "Maxing every component costs {:.0} hash ({} at base production)",
            total_cost,
            format_duration(seconds_at_base_rate)
        )];
        let max_capacity = storage_capacity(cfg.max_level, cfg);
        for row in &rows {
            if let Some(last) = row.level_costs.last().filter(|c| **c > max_capacity) {
                insights.push(format!(
                    "{} final upgrade ({:.0}) exceeds max storage ({:.0})",
                    row.name, last, max_capacity
                ));
            }
        }

        Self {
            rows,
            total_cost,
            seconds_at_base_rate,
            insights,
        }
    }
}

impl Analysis for ComponentAnalysis {
    fn title(&self) -> &'static str {
        "Components"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str("  Component        Role      L1->2    To max        At L1      At max  Stat\n");
        for row in &self.rows {
            let first = row.level_costs.first().copied().unwrap_or(0.0);
            out.push_str(&format!(
                "  {:<15}  {:<8}  {:>6.0}  {:>8.0}  {:>11.2}  {:>10.2}  {}\n",
                row.name,
                format!("{:?}", row.role).to_lowercase(),
                first,
                row.cost_to_max,
                row.value_at_min,
                row.value_at_max,
                row.stat
            ));
        }
        out.push_str(&format!("\n  Total to max everything: {:.0}\n", self.total_cost));
        out
    }
}
