//! Default balance constants.
//!
//! This is the only place tunable numbers are written down.
//! `BalanceConfig::default()` reads from here; nothing else should.

use crate::threat::EnemyArchetype::{self, Basic, Elite, Fast, Swarm, Tank};

// =============================================================================
// SIMULATION
// =============================================================================

/// Simulated seconds advanced per scenario tick.
pub const SIM_TICK_SECONDS: f64 = 1.0;

/// Seconds between unconditional report lines.
pub const SIM_REPORT_INTERVAL_SECONDS: u64 = 300;

/// Seed used when a scenario is run without an explicit seed.
pub const SIM_DEFAULT_SEED: u64 = 42;

// =============================================================================
// HASH ECONOMY
// =============================================================================

/// Hash per second produced at CPU level 1 with no multipliers.
pub const BASE_HASH_PER_SECOND: f64 = 1.0;

/// Hash rate gained per CPU level above 1 (as a fraction of base).
pub const CPU_LEVEL_SCALING: f64 = 0.5;

/// Fraction of the online rate earned while backgrounded.
pub const OFFLINE_EARNINGS_RATE: f64 = 0.2;

/// Offline earnings stop accruing after this many hours.
pub const MAX_OFFLINE_HOURS: f64 = 8.0;

/// Production multiplier per CPU tier (index 0 = tier 1).
pub const CPU_TIER_MULTIPLIERS: [f64; 5] = [1.0, 1.5, 2.0, 3.0, 5.0];

/// Hash cost to reach each CPU tier (index 0 = tier 1, always free).
pub const CPU_TIER_COSTS: [f64; 5] = [0.0, 1_000.0, 5_000.0, 20_000.0, 80_000.0];

// =============================================================================
// COMPONENTS
// =============================================================================

/// Highest level any component can reach.
pub const COMPONENT_MAX_LEVEL: u32 = 10;

// Base upgrade costs (cost of level 1 -> 2); doubles each level.
pub const COMPONENT_COST_PSU: f64 = 50.0;
pub const COMPONENT_COST_STORAGE: f64 = 75.0;
pub const COMPONENT_COST_RAM: f64 = 60.0;
pub const COMPONENT_COST_GPU: f64 = 100.0;
pub const COMPONENT_COST_CACHE: f64 = 100.0;
pub const COMPONENT_COST_EXPANSION: f64 = 150.0;
pub const COMPONENT_COST_IO: f64 = 40.0;
pub const COMPONENT_COST_NETWORK: f64 = 120.0;
pub const COMPONENT_COST_CPU: f64 = 80.0;

/// Hash storage at storage level 1; doubles per level.
pub const BASE_STORAGE_CAPACITY: f64 = 1_000.0;

/// Regen-rate bonus per RAM level.
pub const RAM_REGEN_PER_LEVEL: f64 = 0.1;

/// Damage bonus per GPU level.
pub const GPU_DAMAGE_PER_LEVEL: f64 = 0.1;

/// Attack-speed bonus per cache level.
pub const CACHE_ATTACK_SPEED_PER_LEVEL: f64 = 0.08;

/// Extra tower slots per expansion level above 1.
pub const EXPANSION_SLOTS_PER_LEVEL: u32 = 1;

/// Pickup-radius bonus per I/O level.
pub const IO_PICKUP_PER_LEVEL: f64 = 0.15;

/// Hash multiplier bonus per network level.
pub const NETWORK_HASH_PER_LEVEL: f64 = 0.1;

// =============================================================================
// POWER GRID
// =============================================================================

/// Absolute power budget (watts) per PSU level. Hand-tuned, not a curve.
pub const PSU_POWER_BUDGET: [u32; 10] = [300, 450, 600, 800, 1_000, 1_300, 1_600, 2_000, 2_500, 3_000];

// Tower power draw by protocol rarity.
pub const TOWER_POWER_COMMON: u32 = 20;
pub const TOWER_POWER_RARE: u32 = 30;
pub const TOWER_POWER_EPIC: u32 = 40;
pub const TOWER_POWER_LEGENDARY: u32 = 50;

/// Hash cost of the first tower placement.
pub const TOWER_PLACEMENT_BASE_COST: f64 = 25.0;

/// Additional placement cost per tower already placed.
pub const TOWER_PLACEMENT_COST_PER_TOWER: f64 = 15.0;

// =============================================================================
// EFFICIENCY
// =============================================================================

/// Efficiency percent lost per active leak.
pub const EFFICIENCY_LOSS_PER_LEAK: f64 = 5.0;

/// Seconds between natural leak recoveries at RAM level 1.
pub const LEAK_DECAY_INTERVAL_SECONDS: f64 = 20.0;

/// Efficiency percent at which a warning is raised.
pub const EFFICIENCY_WARNING_THRESHOLD: f64 = 25.0;

/// Passive leak chance per tick per point of threat.
pub const LEAK_CHANCE_PER_THREAT: f64 = 0.002;

/// Passive leak chance never exceeds this per tick.
pub const MAX_LEAK_CHANCE: f64 = 0.25;

// =============================================================================
// THREAT
// =============================================================================

pub const STARTING_THREAT: f64 = 1.0;
pub const MAX_THREAT: f64 = 100.0;

/// Threat gained per second of active play.
pub const THREAT_GROWTH_PER_SECOND: f64 = 0.001;

/// Offline threat growth as a fraction of online growth.
pub const OFFLINE_THREAT_FRACTION: f64 = 0.1;

// Archetype unlock thresholds, ascending.
pub const THREAT_UNLOCK_FAST: f64 = 2.0;
pub const THREAT_UNLOCK_SWARM: f64 = 4.0;
pub const THREAT_UNLOCK_TANK: f64 = 5.0;
pub const THREAT_UNLOCK_ELITE: f64 = 8.0;
pub const THREAT_UNLOCK_BOSS: f64 = 10.0;

// Per-threat-point enemy stat scaling.
pub const THREAT_HEALTH_SCALING: f64 = 0.15;
pub const THREAT_SPEED_SCALING: f64 = 0.02;
pub const THREAT_DAMAGE_SCALING: f64 = 0.05;

// Enemy base stat blocks: (health, speed, damage, hash reward)
pub const ENEMY_BASIC_STATS: (f64, f64, f64, f64) = (20.0, 40.0, 1.0, 1.0);
pub const ENEMY_FAST_STATS: (f64, f64, f64, f64) = (12.0, 80.0, 1.0, 2.0);
pub const ENEMY_SWARM_STATS: (f64, f64, f64, f64) = (6.0, 60.0, 1.0, 1.0);
pub const ENEMY_TANK_STATS: (f64, f64, f64, f64) = (80.0, 25.0, 3.0, 5.0);
pub const ENEMY_ELITE_STATS: (f64, f64, f64, f64) = (150.0, 45.0, 5.0, 15.0);
pub const ENEMY_BOSS_STATS: (f64, f64, f64, f64) = (500.0, 30.0, 10.0, 100.0);

// =============================================================================
// WAVES
// =============================================================================

pub const WAVE_BASE_ENEMY_COUNT: u32 = 5;
pub const WAVE_ENEMIES_PER_WAVE: u32 = 2;
pub const WAVE_HEALTH_SCALING: f64 = 0.15;
pub const WAVE_SPEED_SCALING: f64 = 0.02;
pub const WAVE_BOSS_INTERVAL: u32 = 5;
pub const WAVE_BOSS_HEALTH_MULTIPLIER: f64 = 5.0;
pub const WAVE_BOSS_SPEED_MULTIPLIER: f64 = 0.8;
pub const WAVE_BASE_SPAWN_DELAY: f64 = 1.5;
pub const WAVE_MIN_SPAWN_DELAY: f64 = 0.3;
pub const WAVE_SPAWN_DELAY_REDUCTION: f64 = 0.05;
pub const WAVE_HASH_BONUS_PER_WAVE: f64 = 10.0;

/// Composition brackets as `(first_wave, [(archetype, fraction)])`.
/// Each bracket applies until the next one starts; fractions sum to 1.
pub const WAVE_BRACKETS: &[(u32, &[(EnemyArchetype, f64)])] = &[
    (1, &[(Basic, 1.0)]),
    (4, &[(Basic, 0.7), (Fast, 0.3)]),
    (7, &[(Basic, 0.5), (Fast, 0.3), (Tank, 0.2)]),
    (11, &[(Basic, 0.3), (Fast, 0.25), (Swarm, 0.2), (Tank, 0.15), (Elite, 0.1)]),
];

// =============================================================================
// LOOT
// =============================================================================

// Undamped rarity probabilities; must sum to 1.0.
pub const LOOT_COMMON_PROBABILITY: f64 = 0.60;
pub const LOOT_RARE_PROBABILITY: f64 = 0.25;
pub const LOOT_EPIC_PROBABILITY: f64 = 0.12;
pub const LOOT_LEGENDARY_PROBABILITY: f64 = 0.03;

/// Damping per cumulative kill: factor = 1 / (1 + k * kills).
pub const LOOT_DIMINISHING_FACTOR: f64 = 0.001;

/// Consecutive misses that force a common drop.
pub const LOOT_PITY_THRESHOLD: u32 = 10;

// Drop mass multiplier per difficulty.
pub const LOOT_DIFFICULTY_EASY: f64 = 0.15;
pub const LOOT_DIFFICULTY_NORMAL: f64 = 0.20;
pub const LOOT_DIFFICULTY_HARD: f64 = 0.25;
pub const LOOT_DIFFICULTY_NIGHTMARE: f64 = 0.30;

// =============================================================================
// PROTOCOLS
// =============================================================================

pub const PROTOCOL_MAX_LEVEL: u32 = 10;
pub const PROTOCOL_RANGE_PER_LEVEL: f64 = 0.05;
pub const PROTOCOL_FIRE_RATE_PER_LEVEL: f64 = 0.04;

// Protocol base stats at level 1: (damage, range, fire rate per second, base upgrade cost)
pub const PROTOCOL_KERNEL_PULSE: (f64, f64, f64, f64) = (10.0, 120.0, 1.0, 50.0);
pub const PROTOCOL_BURST: (f64, f64, f64, f64) = (6.0, 100.0, 2.5, 75.0);
pub const PROTOCOL_TRACE_ROUTE: (f64, f64, f64, f64) = (35.0, 220.0, 0.5, 100.0);
pub const PROTOCOL_ICE_SHARD: (f64, f64, f64, f64) = (8.0, 130.0, 1.2, 100.0);
pub const PROTOCOL_FORK_BOMB: (f64, f64, f64, f64) = (18.0, 110.0, 0.8, 150.0);
pub const PROTOCOL_ROOT_ACCESS: (f64, f64, f64, f64) = (60.0, 160.0, 0.6, 200.0);

// =============================================================================
// BOSSES
// =============================================================================

pub const CYBERBOSS_BASE_HEALTH: f64 = 5_000.0;
pub const CYBERBOSS_PHASE2_THRESHOLD: f64 = 0.75;
pub const CYBERBOSS_PHASE3_THRESHOLD: f64 = 0.50;
pub const CYBERBOSS_PHASE4_THRESHOLD: f64 = 0.25;

pub const ZERO_DAY_BASE_HEALTH: f64 = 2_000.0;
pub const ZERO_DAY_SPEED: f64 = 30.0;
/// Efficiency percent drained per second while a Zero-Day is alive.
pub const ZERO_DAY_EFFICIENCY_DRAIN: f64 = 1.0;
pub const ZERO_DAY_MIN_WAVES: u32 = 5;
pub const ZERO_DAY_DEFEAT_HASH_BONUS: f64 = 500.0;
/// Efficiency percent restored on defeating a Zero-Day.
pub const ZERO_DAY_DEFEAT_EFFICIENCY_RESTORE: f64 = 25.0;

// =============================================================================
// SECTORS
// =============================================================================

/// Hash cost to unlock each additional sector, in unlock order.
pub const SECTOR_UNLOCK_COSTS: [f64; 6] = [500.0, 1_500.0, 4_000.0, 10_000.0, 25_000.0, 60_000.0];
