//! Wave descriptors and in-flight wave progress.

use crate::threat::EnemyArchetype;
use serde::{Deserialize, Serialize};

/// Share of a wave's regular enemies that belong to one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionShare {
    pub archetype: EnemyArchetype,
    pub fraction: f64,
}

/// The extra boss unit appended on boss waves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BossUnit {
    /// Wave health multiplier times the boss multiplier.
    pub health_multiplier: f64,
    pub speed_multiplier: f64,
}

/// Everything needed to run one wave. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveDescriptor {
    pub wave: u32,
    /// Regular enemies, not counting the boss unit.
    pub enemy_count: u32,
    pub composition: Vec<CompositionShare>,
    pub health_multiplier: f64,
    pub speed_multiplier: f64,
    pub spawn_delay: f64,
    pub hash_bonus: f64,
    pub boss: Option<BossUnit>,
}

impl WaveDescriptor {
    /// Regular enemies plus the boss, if any.
    pub fn total_spawns(&self) -> u32 {
        self.enemy_count.saturating_add(u32::from(self.boss.is_some()))
    }

    pub fn is_boss_wave(&self) -> bool {
        self.boss.is_some()
    }

    /// Seconds from the first spawn to the last.
    pub fn spawn_duration(&self) -> f64 {
        self.total_spawns().saturating_sub(1) as f64 * self.spawn_delay
    }
}

/// Spawn and resolution counters for the wave in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WaveProgress {
    pub total: u32,
    pub spawned: u32,
    pub killed: u32,
    /// Enemies that reached the defended objective.
    pub leaked: u32,
}

impl WaveProgress {
    pub fn new(descriptor: &WaveDescriptor) -> Self {
        Self {
            total: descriptor.total_spawns(),
            ..Self::default()
        }
    }

    pub fn all_spawned(&self) -> bool {
        self.spawned >= self.total
    }

    /// Returns false once every enemy has been spawned.
    pub fn record_spawn(&mut self) -> bool {
        if self.all_spawned() {
            return false;
        }
        self.spawned += 1;
        true
    }

    pub fn record_kill(&mut self) {
        if self.resolved() < self.spawned {
            self.killed += 1;
        }
    }

    pub fn record_leak(&mut self) {
        if self.resolved() < self.spawned {
            self.leaked += 1;
        }
    }

    pub fn resolved(&self) -> u32 {
        self.killed + self.leaked
    }

    pub fn alive(&self) -> u32 {
        self.spawned - self.resolved()
    }

    /// The wave is over once everything spawned is dead or leaked.
    pub fn is_complete(&self) -> bool {
        self.all_spawned() && self.resolved() == self.total
    }
}
