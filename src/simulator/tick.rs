//! One simulated tick as a pipeline of named steps.
//!
//! Order matters: production, threat, passive leak roll, leak recovery,
//! strategy action, milestones. Each step takes the state by value and
//! hands back the updated state.

use super::config::{ScenarioConfig, Strategy};
use super::state::{SimEvent, SimState};
use crate::components::{next_upgrade_cost, try_upgrade, ComponentId, PurchaseResult};
use crate::core::balance::regen_multiplier;
use crate::core::config::BalanceConfig;
use crate::economy::efficiency::roll_leak;
use crate::economy::{apply_production, next_cpu_tier_cost, production_rate, tower_power_draw, PlacementResult};
use crate::threat::ThreatModel;
use rand::Rng;

/// Active strategy tie-break order: offense and utility before economy.
pub const ACTIVE_PRIORITY: [ComponentId; 9] = [
    ComponentId::Gpu,
    ComponentId::Cache,
    ComponentId::Expansion,
    ComponentId::Io,
    ComponentId::Ram,
    ComponentId::Psu,
    ComponentId::Storage,
    ComponentId::Network,
    ComponentId::Cpu,
];

/// One entry in the speedrun buy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedrunTarget {
    Component(ComponentId),
    CpuTier,
}

/// Speedrun buy order: power, production, network, storage, then offense.
pub const SPEEDRUN_PRIORITY: [SpeedrunTarget; 10] = [
    SpeedrunTarget::Component(ComponentId::Psu),
    SpeedrunTarget::Component(ComponentId::Cpu),
    SpeedrunTarget::CpuTier,
    SpeedrunTarget::Component(ComponentId::Network),
    SpeedrunTarget::Component(ComponentId::Storage),
    SpeedrunTarget::Component(ComponentId::Gpu),
    SpeedrunTarget::Component(ComponentId::Cache),
    SpeedrunTarget::Component(ComponentId::Ram),
    SpeedrunTarget::Component(ComponentId::Expansion),
    SpeedrunTarget::Component(ComponentId::Io),
];

/// Advance `state` by one tick of `dt` seconds.
pub fn step<R: Rng>(state: SimState, dt: f64, scenario: &ScenarioConfig, config: &BalanceConfig, rng: &mut R) -> SimState {
    let threat_before = state.threat;
    let state = begin_tick(state);
    let state = produce(state, dt, config);
    let state = advance_threat(state, dt, config);
    let state = roll_passive_leak(state, scenario.strategy, config, rng);
    let state = recover_leaks(state, dt, config);
    let state = act(state, scenario, config);
    let mut state = check_milestones(state, threat_before, config);
    state.elapsed_seconds += dt;
    state
}

pub fn begin_tick(mut state: SimState) -> SimState {
    state.events.clear();
    state
}

/// 1. Credit production and clamp to storage.
pub fn produce(mut state: SimState, dt: f64, config: &BalanceConfig) -> SimState {
    let rate = production_rate(
        &state.components,
        state.cpu_tier,
        state.efficiency_percent(config),
        config,
    );
    let capacity = state.capacity(config);
    let outcome = apply_production(state.hash, rate, dt, capacity);

    state.hash = outcome.balance;
    state.total_earned += outcome.credited;
    if outcome.capped {
        state.capped_seconds += dt.max(0.0);
        if !state.storage_full {
            state.events.push(SimEvent::StorageFull { capacity });
        }
    }
    state.storage_full = outcome.capped;
    state
}

/// 2. Threat grows at the online rate.
pub fn advance_threat(mut state: SimState, dt: f64, config: &BalanceConfig) -> SimState {
    state.threat = ThreatModel::new(&config.threat).advance_online(state.threat, dt);
    state
}

/// 3. Passive play only: chance of a new leak, scaled by threat.
pub fn roll_passive_leak<R: Rng>(mut state: SimState, strategy: Strategy, config: &BalanceConfig, rng: &mut R) -> SimState {
    if strategy != Strategy::Passive {
        return state;
    }
    if roll_leak(state.threat, &config.efficiency, rng) {
        state.efficiency.add_leak();
        state.total_leaks += 1;
        state.events.push(SimEvent::LeakOccurred {
            leaks: state.efficiency.leaks,
        });
    }
    state
}

/// 4. Scheduled leak repair, sped up by RAM.
pub fn recover_leaks(mut state: SimState, dt: f64, config: &BalanceConfig) -> SimState {
    let regen = regen_multiplier(state.components.get(ComponentId::Ram), &config.components);
    let count = state.efficiency.tick_recovery(dt, regen, &config.efficiency);
    if count > 0 {
        state.events.push(SimEvent::LeaksRepaired { count });
    }
    state
}

/// 5. Strategy-specific spending.
pub fn act(state: SimState, scenario: &ScenarioConfig, config: &BalanceConfig) -> SimState {
    match scenario.strategy {
        Strategy::Passive => state,
        Strategy::Active => {
            let state = place_tower(state, scenario, config);
            buy_cheapest_upgrade(state, config)
        }
        Strategy::Speedrun => {
            let state = buy_economy_upgrade(state, config);
            let state = place_tower(state, scenario, config);
            unlock_sector(state, config)
        }
    }
}

/// 6. Log archetype unlocks and the efficiency warning.
pub fn check_milestones(mut state: SimState, threat_before: f64, config: &BalanceConfig) -> SimState {
    let model = ThreatModel::new(&config.threat);
    for archetype in model.newly_unlocked(threat_before, state.threat) {
        tracing::debug!(archetype = archetype.name(), threat = state.threat, "archetype unlocked");
        state.events.push(SimEvent::ArchetypeUnlocked { archetype });
    }

    let warning = state.efficiency.is_warning(&config.efficiency);
    if warning && !state.warning_active {
        state.events.push(SimEvent::EfficiencyWarning {
            efficiency: state.efficiency_percent(config),
        });
    }
    state.warning_active = warning;
    state
}

fn place_tower(mut state: SimState, scenario: &ScenarioConfig, config: &BalanceConfig) -> SimState {
    let draw = tower_power_draw(scenario.tower_rarity, &config.power_grid);
    let result = state.towers.try_place(draw, &state.components, &mut state.hash, config);
    if let PlacementResult::Placed {
        tower_count,
        power_used,
        cost,
        ..
    } = result
    {
        state.record_spend(cost);
        state.events.push(SimEvent::TowerPlaced {
            tower_count,
            power_used,
            cost,
        });
    }
    state
}

fn upgrade(mut state: SimState, id: ComponentId, config: &BalanceConfig) -> SimState {
    let result = try_upgrade(id, &mut state.components, &mut state.hash, &config.components);
    if let PurchaseResult::Purchased {
        component,
        new_level,
        cost,
    } = result
    {
        state.record_spend(cost);
        state.upgrades += 1;
        state.events.push(SimEvent::ComponentUpgraded {
            component,
            new_level,
            cost,
        });
    }
    state
}

/// Cheapest affordable upgrade; equal costs go to the earlier entry in
/// [`ACTIVE_PRIORITY`].
fn buy_cheapest_upgrade(state: SimState, config: &BalanceConfig) -> SimState {
    let choice = ACTIVE_PRIORITY
        .iter()
        .filter_map(|id| next_upgrade_cost(*id, &state.components, &config.components).map(|cost| (*id, cost)))
        .filter(|(_, cost)| *cost <= state.hash)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match choice {
        Some((id, _)) => upgrade(state, id, config),
        None => state,
    }
}

fn speedrun_target_cost(target: SpeedrunTarget, state: &SimState, config: &BalanceConfig) -> Option<f64> {
    match target {
        SpeedrunTarget::Component(id) => next_upgrade_cost(id, &state.components, &config.components),
        SpeedrunTarget::CpuTier => next_cpu_tier_cost(state.cpu_tier, &config.hash_economy),
    }
}

/// Save for the first target in [`SPEEDRUN_PRIORITY`] that is not maxed and
/// fits in storage; buy it once affordable.
fn buy_economy_upgrade(mut state: SimState, config: &BalanceConfig) -> SimState {
    let capacity = state.capacity(config);
    let next = SPEEDRUN_PRIORITY.iter().find_map(|target| {
        speedrun_target_cost(*target, &state, config)
            .filter(|cost| *cost <= capacity)
            .map(|cost| (*target, cost))
    });

    let Some((target, cost)) = next else {
        return state;
    };
    if cost > state.hash {
        return state;
    }

    match target {
        SpeedrunTarget::Component(id) => upgrade(state, id, config),
        SpeedrunTarget::CpuTier => {
            state.hash -= cost;
            state.cpu_tier += 1;
            state.record_spend(cost);
            state.upgrades += 1;
            tracing::debug!(tier = state.cpu_tier, cost, "cpu tier upgraded");
            state.events.push(SimEvent::CpuTierUpgraded {
                tier: state.cpu_tier,
                cost,
            });
            state
        }
    }
}

fn unlock_sector(mut state: SimState, config: &BalanceConfig) -> SimState {
    let Some(cost) = config
        .simulation
        .sector_unlock_costs
        .get(state.sectors_unlocked as usize)
        .copied()
    else {
        return state;
    };
    if state.hash < cost {
        return state;
    }
    state.hash -= cost;
    state.sectors_unlocked += 1;
    state.record_spend(cost);
    state.events.push(SimEvent::SectorUnlocked {
        sectors: state.sectors_unlocked,
        cost,
    });
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::EfficiencyState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scenario(strategy: Strategy) -> ScenarioConfig {
        ScenarioConfig::new(strategy, 0, &BalanceConfig::default())
    }

    #[test]
    fn test_produce_credits_and_caps() {
        let config = BalanceConfig::default();
        let mut state = SimState::initial(&config);
        state = produce(state, 1.0, &config);
        assert_eq!(state.hash, config.hash_economy.base_hash_per_second);

        state.hash = state.capacity(&config);
        state = produce(state, 1.0, &config);
        assert_eq!(state.hash, state.capacity(&config));
        assert!(matches!(state.events.as_slice(), [SimEvent::StorageFull { .. }]));

        // Still full: no second event
        let state = produce(begin_tick(state), 1.0, &config);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_active_prefers_cheapest_upgrade() {
        let config = BalanceConfig::default();
        let mut state = SimState::initial(&config);
        state.hash = config.components.base_costs.io;

        let state = buy_cheapest_upgrade(state, &config);

        assert_eq!(state.components.get(ComponentId::Io), 2);
        assert_eq!(state.hash, 0.0);
    }

    #[test]
    fn test_active_places_tower_before_upgrading() {
        let config = BalanceConfig::default();
        let mut state = SimState::initial(&config);
        state.hash = config.power_grid.placement_base_cost;

        let state = act(state, &scenario(Strategy::Active), &config);

        assert_eq!(state.towers.count(), 1);
        assert_eq!(state.upgrades, 0);
    }

    #[test]
    fn test_speedrun_saves_for_psu() {
        let config = BalanceConfig::default();
        let mut state = SimState::initial(&config);
        state.hash = config.components.base_costs.psu - 1.0;

        let state = buy_economy_upgrade(state, &config);
        assert_eq!(state.upgrades, 0);

        let mut state = state;
        state.hash = config.components.base_costs.psu;
        let state = buy_economy_upgrade(state, &config);
        assert_eq!(state.components.get(ComponentId::Psu), 2);
    }

    #[test]
    fn test_sector_unlock_in_order() {
        let config = BalanceConfig::default();
        let mut state = SimState::initial(&config);
        state.hash = config.simulation.sector_unlock_costs[0];

        let state = unlock_sector(state, &config);

        assert_eq!(state.sectors_unlocked, 1);
        assert_eq!(state.hash, 0.0);
        assert_eq!(state.total_spent, config.simulation.sector_unlock_costs[0]);
    }

    #[test]
    fn test_non_passive_never_leaks() {
        let config = BalanceConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = SimState::initial(&config);
        state.threat = config.threat.max_threat;
        for _ in 0..1_000 {
            state = roll_passive_leak(state, Strategy::Active, &config, &mut rng);
        }
        assert_eq!(state.total_leaks, 0);
    }

    #[test]
    fn test_warning_fires_once_per_crossing() {
        let config = BalanceConfig::default();
        let threat = config.threat.starting_threat;
        let mut state = SimState::initial(&config);
        state.efficiency = EfficiencyState::with_leaks(100);

        let state = check_milestones(state, threat, &config);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::EfficiencyWarning { .. })));

        let state = check_milestones(begin_tick(state), threat, &config);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_step_advances_time_and_threat() {
        let config = BalanceConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = SimState::initial(&config);
        let next = step(state.clone(), 1.0, &scenario(Strategy::Passive), &config, &mut rng);
        assert_eq!(next.elapsed_seconds, 1.0);
        assert!(next.threat > state.threat);
    }
}
