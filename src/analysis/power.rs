//! Power budget per PSU level and towers supported per rarity.

use super::Analysis;
use crate::components::ComponentId;
use crate::core::balance::{exponential_upgrade_cost, power_budget};
use crate::core::config::BalanceConfig;
use crate::economy::{powered_slots, tower_power_draw};
use crate::loot::Rarity;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PowerRow {
    pub psu_level: u32,
    pub budget_watts: u32,
    /// Towers supported per rarity, most common first.
    pub towers: [u32; 4],
    pub upgrade_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerAnalysis {
    pub tower_draw: [u32; 4],
    pub rows: Vec<PowerRow>,
    pub insights: Vec<String>,
}

impl PowerAnalysis {
    pub fn build(config: &BalanceConfig) -> Self {
        let grid = &config.power_grid;
        let max_level = config.components.max_level;
        let tower_draw = Rarity::ALL.map(|r| tower_power_draw(r, grid));
        let psu_base = ComponentId::Psu.base_cost(&config.components);

        let rows: Vec<PowerRow> = (1..=max_level)
            .map(|level| PowerRow {
                psu_level: level,
                budget_watts: power_budget(level, grid),
                towers: tower_draw.map(|draw| powered_slots(level, draw, grid)),
                upgrade_cost: (level < max_level).then(|| exponential_upgrade_cost(psu_base, level)),
            })
            .collect();

        let mut insights = Vec::new();
        if rows.windows(2).any(|w| w[1].budget_watts <= w[0].budget_watts) {
            insights.push("Power budget table is not strictly increasing".to_string());
        }
        if let Some(first) = rows.first() {
            let legendary = first.towers[3];
            if legendary < 3 {
                insights.push(format!(
                    "PSU L1 powers only {} legendary tower(s)",
                    legendary
                ));
            }
        }
        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            insights.push(format!(
                "Max PSU supports {}x the common towers of L1",
                last.towers[0] / first.towers[0].max(1)
            ));
        }

        Self {
            tower_draw,
            rows,
            insights,
        }
    }
}

impl Analysis for PowerAnalysis {
    fn title(&self) -> &'static str {
        "Power Grid"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "  Tower draw: common {}W, rare {}W, epic {}W, legendary {}W\n\n",
            self.tower_draw[0], self.tower_draw[1], self.tower_draw[2], self.tower_draw[3]
        ));
        out.push_str("  PSU   Budget   Common  Rare  Epic  Legend     Next\n");
        for row in &self.rows {
            let next = row.upgrade_cost.map(|c| format!("{:.0}", c)).unwrap_or_else(|| "max".into());
            out.push_str(&format!(
                "  {:>3}  {:>6}W   {:>6}  {:>4}  {:>4}  {:>6}  {:>7}\n",
                row.psu_level, row.budget_watts, row.towers[0], row.towers[1], row.towers[2], row.towers[3], next
            ));
        }
        out
    }
}
