//! The single state record a scenario advances, and the events a tick logs.

use crate::components::{ComponentId, ComponentLevels};
use crate::core::config::BalanceConfig;
use crate::economy::{hash_capacity, EfficiencyState, TowerPlacement};
use crate::threat::EnemyArchetype;
use serde::Serialize;

/// Something worth a report line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    ComponentUpgraded { component: ComponentId, new_level: u32, cost: f64 },
    CpuTierUpgraded { tier: u32, cost: f64 },
    TowerPlaced { tower_count: u32, power_used: u32, cost: f64 },
    SectorUnlocked { sectors: u32, cost: f64 },
    LeakOccurred { leaks: u32 },
    LeaksRepaired { count: u32 },
    ArchetypeUnlocked { archetype: EnemyArchetype },
    EfficiencyWarning { efficiency: f64 },
    /// Production hit the storage cap. Logged on the first capped tick only.
    StorageFull { capacity: f64 },
}

impl SimEvent {
    pub fn describe(&self) -> String {
        match self {
            SimEvent::ComponentUpgraded {
                component,
                new_level,
                cost,
            } => format!("{} -> L{} ({:.0} hash)", component.name(), new_level, cost),
            SimEvent::CpuTierUpgraded { tier, cost } => format!("CPU tier {} ({:.0} hash)", tier, cost),
            SimEvent::TowerPlaced {
                tower_count,
                power_used,
                cost,
            } => format!("tower #{} placed, {}W ({:.0} hash)", tower_count, power_used, cost),
            SimEvent::SectorUnlocked { sectors, cost } => format!("sector {} unlocked ({:.0} hash)", sectors, cost),
            SimEvent::LeakOccurred { leaks } => format!("leak ({} active)", leaks),
            SimEvent::LeaksRepaired { count } => format!("{} leak(s) repaired", count),
            SimEvent::ArchetypeUnlocked { archetype } => format!("{} enemies unlocked", archetype.name()),
            SimEvent::EfficiencyWarning { efficiency } => format!("efficiency warning ({:.0}%)", efficiency),
            SimEvent::StorageFull { capacity } => format!("storage full ({:.0})", capacity),
        }
    }
}

/// Everything a scenario tracks, advanced one tick at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimState {
    pub hash: f64,
    pub threat: f64,
    pub components: ComponentLevels,
    pub cpu_tier: u32,
    pub towers: TowerPlacement,
    pub sectors_unlocked: u32,
    pub efficiency: EfficiencyState,
    pub total_earned: f64,
    pub total_spent: f64,
    pub elapsed_seconds: f64,
    pub upgrades: u32,
    /// Seconds spent pinned at the storage cap.
    pub capped_seconds: f64,
    pub total_leaks: u32,
    pub storage_full: bool,
    pub warning_active: bool,
    /// Events from the most recent tick only.
    pub events: Vec<SimEvent>,
}

impl SimState {
    /// Fresh run: no hash, every component at level 1, full efficiency.
    pub fn initial(config: &BalanceConfig) -> Self {
        Self {
            hash: 0.0,
            threat: config.threat.starting_threat,
            components: ComponentLevels::new(),
            cpu_tier: 1,
            towers: TowerPlacement::new(),
            sectors_unlocked: 0,
            efficiency: EfficiencyState::new(),
            total_earned: 0.0,
            total_spent: 0.0,
            elapsed_seconds: 0.0,
            upgrades: 0,
            capped_seconds: 0.0,
            total_leaks: 0,
            storage_full: false,
            warning_active: false,
            events: Vec::new(),
        }
    }

    pub fn efficiency_percent(&self, config: &BalanceConfig) -> f64 {
        self.efficiency.efficiency(&config.efficiency)
    }

    pub fn capacity(&self, config: &BalanceConfig) -> f64 {
        hash_capacity(&self.components, config)
    }

    /// Track hash already taken off the balance by a purchase.
    pub(crate) fn record_spend(&mut self, cost: f64) {
        self.total_spent += cost;
    }
}
