//! Component upgrade pricing and purchasing.

use super::types::{ComponentId, ComponentLevels};
use crate::core::balance::{cumulative_upgrade_cost, exponential_upgrade_cost};
use crate::core::config::ComponentConfig;
use serde::Serialize;

/// Outcome of trying to buy one component level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PurchaseResult {
    Purchased {
        component: ComponentId,
        new_level: u32,
        cost: f64,
    },
    InsufficientHash {
        cost: f64,
        balance: f64,
    },
    MaxLevel,
}

impl PurchaseResult {
    pub fn is_purchased(&self) -> bool {
        matches!(self, PurchaseResult::Purchased { .. })
    }
}

/// Cost of the next level, or `None` if the component is maxed.
pub fn next_upgrade_cost(id: ComponentId, levels: &ComponentLevels, cfg: &ComponentConfig) -> Option<f64> {
    let level = levels.get(id);
    if level >= cfg.max_level {
        return None;
    }
    Some(exponential_upgrade_cost(id.base_cost(cfg), level))
}

pub fn can_afford(id: ComponentId, levels: &ComponentLevels, balance: f64, cfg: &ComponentConfig) -> bool {
    next_upgrade_cost(id, levels, cfg).is_some_and(|cost| balance >= cost)
}

/// Buy one level: the level goes up and the cost is debited together, or
/// neither happens.
pub fn try_upgrade(
    id: ComponentId,
    levels: &mut ComponentLevels,
    balance: &mut f64,
    cfg: &ComponentConfig,
) -> PurchaseResult {
    let Some(cost) = next_upgrade_cost(id, levels, cfg) else {
        return PurchaseResult::MaxLevel;
    };
    if *balance < cost {
        return PurchaseResult::InsufficientHash {
            cost,
            balance: *balance,
        };
    }
    *balance -= cost;
    let new_level = levels.increment(id);
    tracing::debug!(component = id.key(), new_level, cost, "component upgraded");
    PurchaseResult::Purchased {
        component: id,
        new_level,
        cost,
    }
}

/// Hash needed to take a component from level 1 to max.
pub fn total_cost_to_max(id: ComponentId, cfg: &ComponentConfig) -> f64 {
    cumulative_upgrade_cost(id.base_cost(cfg), 1, cfg.max_level)
}

/// Hash needed to max every component from a fresh profile.
pub fn total_cost_all_components(cfg: &ComponentConfig) -> f64 {
    ComponentId::ALL
        .iter()
        .map(|id| total_cost_to_max(*id, cfg))
        .sum()
}
