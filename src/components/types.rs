//! Component identifiers and per-run component levels.

use crate::core::balance::{
    attack_speed_multiplier, base_hash_rate, damage_multiplier, extra_slots, network_hash_multiplier,
    pickup_multiplier, power_budget, regen_multiplier, storage_capacity,
};
use crate::core::config::{BalanceConfig, ComponentConfig};
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine upgrade tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentId {
    /// Power supply: tower power budget.
    Psu,
    /// Hash storage capacity.
    Storage,
    /// Leak recovery (regen) rate.
    Ram,
    /// Tower damage multiplier.
    Gpu,
    /// Tower attack-speed multiplier.
    Cache,
    /// Extra tower slots.
    Expansion,
    /// Pickup radius multiplier.
    Io,
    /// Hash multiplier.
    Network,
    /// Base hash per second.
    Cpu,
}

/// What a component mainly feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentRole {
    Economy,
    Offense,
    Utility,
}

impl ComponentId {
    pub const ALL: [ComponentId; 9] = [
        ComponentId::Psu,
        ComponentId::Storage,
        ComponentId::Ram,
        ComponentId::Gpu,
        ComponentId::Cache,
        ComponentId::Expansion,
        ComponentId::Io,
        ComponentId::Network,
        ComponentId::Cpu,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Short key used in config files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            ComponentId::Psu => "psu",
            ComponentId::Storage => "storage",
            ComponentId::Ram => "ram",
            ComponentId::Gpu => "gpu",
            ComponentId::Cache => "cache",
            ComponentId::Expansion => "expansion",
            ComponentId::Io => "io",
            ComponentId::Network => "network",
            ComponentId::Cpu => "cpu",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentId::Psu => "Power Supply",
            ComponentId::Storage => "Storage",
            ComponentId::Ram => "RAM",
            ComponentId::Gpu => "GPU",
            ComponentId::Cache => "Cache",
            ComponentId::Expansion => "Expansion Slots",
            ComponentId::Io => "I/O Controller",
            ComponentId::Network => "Network Card",
            ComponentId::Cpu => "CPU",
        }
    }

    /// What the component's value means, for table headers.
    pub fn stat_label(&self) -> &'static str {
        match self {
            ComponentId::Psu => "power budget (W)",
            ComponentId::Storage => "hash capacity",
            ComponentId::Ram => "regen multiplier",
            ComponentId::Gpu => "damage multiplier",
            ComponentId::Cache => "attack speed multiplier",
            ComponentId::Expansion => "extra tower slots",
            ComponentId::Io => "pickup radius multiplier",
            ComponentId::Network => "hash multiplier",
            ComponentId::Cpu => "hash/sec",
        }
    }

    pub fn role(&self) -> ComponentRole {
        match self {
            ComponentId::Psu
            | ComponentId::Storage
            | ComponentId::Network
            | ComponentId::Cpu => ComponentRole::Economy,
            ComponentId::Gpu | ComponentId::Cache => ComponentRole::Offense,
            ComponentId::Ram | ComponentId::Expansion | ComponentId::Io => ComponentRole::Utility,
        }
    }

    pub fn base_cost(&self, cfg: &ComponentConfig) -> f64 {
        let costs = &cfg.base_costs;
        match self {
            ComponentId::Psu => costs.psu,
            ComponentId::Storage => costs.storage,
            ComponentId::Ram => costs.ram,
            ComponentId::Gpu => costs.gpu,
            ComponentId::Cache => costs.cache,
            ComponentId::Expansion => costs.expansion,
            ComponentId::Io => costs.io,
            ComponentId::Network => costs.network,
            ComponentId::Cpu => costs.cpu,
        }
    }

    /// The component's scaled stat at `level`.
    pub fn value_at(&self, level: u32, config: &BalanceConfig) -> f64 {
        let cfg = &config.components;
        match self {
            ComponentId::Psu => power_budget(level, &config.power_grid) as f64,
            ComponentId::Storage => storage_capacity(level, cfg),
            ComponentId::Ram => regen_multiplier(level, cfg),
            ComponentId::Gpu => damage_multiplier(level, cfg),
            ComponentId::Cache => attack_speed_multiplier(level, cfg),
            ComponentId::Expansion => extra_slots(level, cfg) as f64,
            ComponentId::Io => pickup_multiplier(level, cfg),
            ComponentId::Network => network_hash_multiplier(level, cfg),
            ComponentId::Cpu => base_hash_rate(level, &config.hash_economy),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ComponentId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| ConfigError::UnknownComponent(s.to_string()))
    }
}

/// Current level of every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLevels {
    levels: [u32; 9],
}

impl Default for ComponentLevels {
    fn default() -> Self {
        Self { levels: [1; 9] }
    }
}

impl ComponentLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ComponentId) -> u32 {
        self.levels[id.index()]
    }

    /// Raise a component by one level. Returns the new level.
    pub(crate) fn increment(&mut self, id: ComponentId) -> u32 {
        self.levels[id.index()] += 1;
        self.levels[id.index()]
    }

    /// Set a level directly (profile loading, tests). Clamped to at least 1.
    pub fn set(&mut self, id: ComponentId, level: u32) {
        self.levels[id.index()] = level.max(1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, u32)> + '_ {
        ComponentId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }

    /// Sum of levels gained above the starting level across all components.
    pub fn total_upgrades(&self) -> u32 {
        self.levels.iter().map(|l| l - 1).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ids_have_unique_keys() {
        let mut keys: Vec<_> = ComponentId::ALL.iter().map(|c| c.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, id) in ComponentId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_parse_known_component() {
        assert_eq!("gpu".parse::<ComponentId>().unwrap(), ComponentId::Gpu);
        assert_eq!(" PSU ".parse::<ComponentId>().unwrap(), ComponentId::Psu);
    }

    #[test]
    fn test_parse_unknown_component_fails() {
        let err = "quantum".parse::<ComponentId>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownComponent(name) if name == "quantum"));
    }

    #[test]
    fn test_levels_start_at_one() {
        let levels = ComponentLevels::new();
        assert!(levels.iter().all(|(_, level)| level == 1));
        assert_eq!(levels.total_upgrades(), 0);
    }

    #[test]
    fn test_values_monotonic_in_level() {
        let config = BalanceConfig::default();
        for id in ComponentId::ALL {
            for level in 1..config.components.max_level {
                assert!(
                    id.value_at(level + 1, &config) >= id.value_at(level, &config),
                    "{} should not decrease from level {}",
                    id,
                    level
                );
            }
        }
    }
}
