//! Power grid and tower placement.

use crate::components::{ComponentId, ComponentLevels};
use crate::core::balance::{extra_slots, power_budget};
use crate::core::config::{BalanceConfig, PowerGridConfig};
use crate::loot::Rarity;
use serde::{Deserialize, Serialize};

/// Watts drawn by a tower of the given rarity.
pub fn tower_power_draw(rarity: Rarity, grid: &PowerGridConfig) -> u32 {
    let power = &grid.tower_power;
    match rarity {
        Rarity::Common => power.common,
        Rarity::Rare => power.rare,
        Rarity::Epic => power.epic,
        Rarity::Legendary => power.legendary,
    }
}

/// Towers the PSU budget can power at a uniform draw.
pub fn powered_slots(psu_level: u32, draw: u32, grid: &PowerGridConfig) -> u32 {
    power_budget(psu_level, grid) / draw.max(1)
}

/// Upper bound on tower count: powered slots plus expansion slots.
pub fn max_towers(levels: &ComponentLevels, draw: u32, config: &BalanceConfig) -> u32 {
    powered_slots(levels.get(ComponentId::Psu), draw, &config.power_grid)
        + extra_slots(levels.get(ComponentId::Expansion), &config.components)
}

/// Hash cost of placing the next tower.
pub fn placement_cost(towers_placed: u32, grid: &PowerGridConfig) -> f64 {
    grid.placement_base_cost + towers_placed as f64 * grid.placement_cost_per_tower
}

/// Outcome of trying to place a tower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PlacementResult {
    Placed {
        tower_count: u32,
        power_used: u32,
        cost: f64,
        /// Placed in a self-powered expansion slot.
        expansion_slot: bool,
    },
    InsufficientHash { cost: f64, balance: f64 },
    NoFreeSlot { power_used: u32, power_budget: u32 },
}

impl PlacementResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementResult::Placed { .. })
    }
}

/// Placed towers and the power they draw.
///
/// Towers go into powered slots while the PSU budget allows, then into
/// expansion slots, which draw no power. This keeps `power_used <= budget`
/// and `count <= budget / draw + extra_slots` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TowerPlacement {
    pub powered: u32,
    pub in_expansion: u32,
    pub power_used: u32,
}

impl TowerPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.powered + self.in_expansion
    }

    pub fn try_place(
        &mut self,
        draw: u32,
        levels: &ComponentLevels,
        balance: &mut f64,
        config: &BalanceConfig,
    ) -> PlacementResult {
        let budget = power_budget(levels.get(ComponentId::Psu), &config.power_grid);
        let expansion = extra_slots(levels.get(ComponentId::Expansion), &config.components);

        let powered_ok = self.power_used + draw <= budget;
        let expansion_ok = self.in_expansion < expansion;
        if !powered_ok && !expansion_ok {
            return PlacementResult::NoFreeSlot {
                power_used: self.power_used,
                power_budget: budget,
            };
        }

        let cost = placement_cost(self.count(), &config.power_grid);
        if *balance < cost {
            return PlacementResult::InsufficientHash {
                cost,
                balance: *balance,
            };
        }

        *balance -= cost;
        if powered_ok {
            self.powered += 1;
            self.power_used += draw;
        } else {
            self.in_expansion += 1;
        }
        tracing::debug!(towers = self.count(), power_used = self.power_used, cost, "tower placed");

        PlacementResult::Placed {
            tower_count: self.count(),
            power_used: self.power_used,
            cost,
            expansion_slot: !powered_ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_by_rarity_ascends() {
        let grid = PowerGridConfig::default();
        let draws: Vec<u32> = Rarity::ALL.iter().map(|r| tower_power_draw(*r, &grid)).collect();
        assert!(draws.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_power_budget_never_exceeded() {
        let config = BalanceConfig::default();
        let levels = ComponentLevels::new();
        let draw = config.power_grid.tower_power.common;
        let budget = power_budget(1, &config.power_grid);
        let mut placement = TowerPlacement::new();
        let mut balance = f64::MAX;

        while placement.try_place(draw, &levels, &mut balance, &config).is_placed() {
            assert!(placement.power_used <= budget);
        }

        assert_eq!(placement.count(), max_towers(&levels, draw, &config));
    }

    #[test]
    fn test_expansion_slots_add_unpowered_towers() {
        let config = BalanceConfig::default();
        let mut levels = ComponentLevels::new();
        levels.set(ComponentId::Expansion, 3);
        let draw = config.power_grid.tower_power.legendary;
        let mut placement = TowerPlacement::new();
        let mut balance = f64::MAX;

        while placement.try_place(draw, &levels, &mut balance, &config).is_placed() {}

        assert_eq!(placement.in_expansion, 2 * config.components.expansion_slots_per_level);
        assert_eq!(placement.count(), max_towers(&levels, draw, &config));
        assert!(placement.power_used <= power_budget(1, &config.power_grid));
    }

    #[test]
    fn test_placement_needs_hash() {
        let config = BalanceConfig::default();
        let levels = ComponentLevels::new();
        let mut placement = TowerPlacement::new();
        let mut balance = 1.0;

        let result = placement.try_place(20, &levels, &mut balance, &config);

        assert!(matches!(result, PlacementResult::InsufficientHash { .. }));
        assert_eq!(placement.count(), 0);
        assert_eq!(balance, 1.0);
    }

    #[test]
    fn test_placement_cost_grows() {
        let grid = PowerGridConfig::default();
        assert!(placement_cost(5, &grid) > placement_cost(0, &grid));
    }
}
