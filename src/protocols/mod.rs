//! Defensive protocols (towers) and their per-level scaling.

use crate::components::{ComponentId, ComponentLevels};
use crate::core::balance::{
    attack_speed_multiplier, damage_multiplier, exponential_upgrade_cost, level_stat_multiplier, linear_multiplier,
};
use crate::core::config::{BalanceConfig, ProtocolScalingConfig};
use crate::core::constants::*;
use crate::economy::tower_power_draw;
use crate::loot::Rarity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProtocolKind {
    KernelPulse,
    BurstProtocol,
    TraceRoute,
    IceShard,
    ForkBomb,
    RootAccess,
}

/// Level-1 stats before any scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProtocolBase {
    pub damage: f64,
    pub range: f64,
    pub fire_rate: f64,
    pub upgrade_cost: f64,
}

impl From<(f64, f64, f64, f64)> for ProtocolBase {
    fn from((damage, range, fire_rate, upgrade_cost): (f64, f64, f64, f64)) -> Self {
        Self {
            damage,
            range,
            fire_rate,
            upgrade_cost,
        }
    }
}

impl ProtocolKind {
    pub const ALL: [ProtocolKind; 6] = [
        ProtocolKind::KernelPulse,
        ProtocolKind::BurstProtocol,
        ProtocolKind::TraceRoute,
        ProtocolKind::IceShard,
        ProtocolKind::ForkBomb,
        ProtocolKind::RootAccess,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProtocolKind::KernelPulse => "Kernel Pulse",
            ProtocolKind::BurstProtocol => "Burst Protocol",
            ProtocolKind::TraceRoute => "Trace Route",
            ProtocolKind::IceShard => "Ice Shard",
            ProtocolKind::ForkBomb => "Fork Bomb",
            ProtocolKind::RootAccess => "Root Access",
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            ProtocolKind::KernelPulse | ProtocolKind::BurstProtocol => Rarity::Common,
            ProtocolKind::TraceRoute | ProtocolKind::IceShard => Rarity::Rare,
            ProtocolKind::ForkBomb => Rarity::Epic,
            ProtocolKind::RootAccess => Rarity::Legendary,
        }
    }

    pub fn base(&self) -> ProtocolBase {
        match self {
            ProtocolKind::KernelPulse => PROTOCOL_KERNEL_PULSE.into(),
            ProtocolKind::BurstProtocol => PROTOCOL_BURST.into(),
            ProtocolKind::TraceRoute => PROTOCOL_TRACE_ROUTE.into(),
            ProtocolKind::IceShard => PROTOCOL_ICE_SHARD.into(),
            ProtocolKind::ForkBomb => PROTOCOL_FORK_BOMB.into(),
            ProtocolKind::RootAccess => PROTOCOL_ROOT_ACCESS.into(),
        }
    }
}

/// A protocol's stats at one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProtocolStats {
    pub level: u32,
    pub damage: f64,
    pub range: f64,
    pub fire_rate: f64,
    pub dps: f64,
    /// Cost to reach the next level; `None` at max level.
    pub upgrade_cost: Option<f64>,
}

pub fn range_multiplier(level: u32, cfg: &ProtocolScalingConfig) -> f64 {
    linear_multiplier(level, cfg.range_per_level)
}

pub fn fire_rate_multiplier(level: u32, cfg: &ProtocolScalingConfig) -> f64 {
    linear_multiplier(level, cfg.fire_rate_per_level)
}

pub fn protocol_upgrade_cost(kind: ProtocolKind, level: u32, cfg: &ProtocolScalingConfig) -> Option<f64> {
    (level < cfg.max_level).then(|| exponential_upgrade_cost(kind.base().upgrade_cost, level))
}

pub fn protocol_stats(kind: ProtocolKind, level: u32, cfg: &ProtocolScalingConfig) -> ProtocolStats {
    let level = level.clamp(1, cfg.max_level.max(1));
    let base = kind.base();
    let damage = base.damage * level_stat_multiplier(level);
    let fire_rate = base.fire_rate * fire_rate_multiplier(level, cfg);
    ProtocolStats {
        level,
        damage,
        range: base.range * range_multiplier(level, cfg),
        fire_rate,
        dps: damage * fire_rate,
        upgrade_cost: protocol_upgrade_cost(kind, level, cfg),
    }
}

/// Stats with the GPU damage and cache attack-speed upgrades applied.
pub fn effective_stats(kind: ProtocolKind, level: u32, levels: &ComponentLevels, config: &BalanceConfig) -> ProtocolStats {
    let mut stats = protocol_stats(kind, level, &config.protocols);
    stats.damage *= damage_multiplier(levels.get(ComponentId::Gpu), &config.components);
    stats.fire_rate *= attack_speed_multiplier(levels.get(ComponentId::Cache), &config.components);
    stats.dps = stats.damage * stats.fire_rate;
    stats
}

/// Damage per second per watt of power drawn.
pub fn dps_per_watt(kind: ProtocolKind, level: u32, config: &BalanceConfig) -> f64 {
    let watts = tower_power_draw(kind.rarity(), &config.power_grid).max(1);
    protocol_stats(kind, level, &config.protocols).dps / watts as f64
}

/// Total hash to take a protocol from level 1 to max.
pub fn cost_to_max(kind: ProtocolKind, cfg: &ProtocolScalingConfig) -> f64 {
    (1..cfg.max_level)
        .filter_map(|level| protocol_upgrade_cost(kind, level, cfg))
        .sum()
}
