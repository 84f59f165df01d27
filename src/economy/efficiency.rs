//! Efficiency and the leak counter behind it.

use crate::core::config::EfficiencyConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Leak counter plus the timer driving natural recovery.
///
/// Efficiency is never stored; it is always `max(0, 100 - leaks * loss)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EfficiencyState {
    pub leaks: u32,
    recovery_timer: f64,
}

impl EfficiencyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leaks(leaks: u32) -> Self {
        Self {
            leaks,
            recovery_timer: 0.0,
        }
    }

    /// Efficiency percent in `[0, 100]`.
    pub fn efficiency(&self, cfg: &EfficiencyConfig) -> f64 {
        (100.0 - self.leaks as f64 * cfg.loss_per_leak).clamp(0.0, 100.0)
    }

    pub fn is_warning(&self, cfg: &EfficiencyConfig) -> bool {
        self.efficiency(cfg) <= cfg.warning_threshold
    }

    pub fn add_leak(&mut self) {
        self.leaks += 1;
    }

    /// Remove up to `count` leaks. Returns how many were removed.
    pub fn remove_leaks(&mut self, count: u32) -> u32 {
        let removed = count.min(self.leaks);
        self.leaks -= removed;
        if self.leaks == 0 {
            self.recovery_timer = 0.0;
        }
        removed
    }

    /// Advance the recovery timer. One leak is repaired every
    /// `leak_decay_interval / regen_multiplier` seconds while any are active.
    /// Returns the number of leaks repaired.
    pub fn tick_recovery(&mut self, delta_seconds: f64, regen_multiplier: f64, cfg: &EfficiencyConfig) -> u32 {
        if self.leaks == 0 {
            self.recovery_timer = 0.0;
            return 0;
        }
        let interval = recovery_interval(regen_multiplier, cfg);
        self.recovery_timer += delta_seconds.max(0.0);

        let mut recovered = 0;
        while self.recovery_timer >= interval && self.leaks > 0 {
            self.recovery_timer -= interval;
            self.leaks -= 1;
            recovered += 1;
        }
        if self.leaks == 0 {
            self.recovery_timer = 0.0;
        }
        recovered
    }
}

/// Seconds between natural leak repairs. Floored so a huge regen multiplier
/// cannot spin the recovery loop.
pub fn recovery_interval(regen_multiplier: f64, cfg: &EfficiencyConfig) -> f64 {
    (cfg.leak_decay_interval / regen_multiplier.max(0.01)).max(0.01)
}

/// Chance of a new leak in one passive tick at a given threat.
pub fn leak_chance(threat: f64, cfg: &EfficiencyConfig) -> f64 {
    (threat.max(0.0) * cfg.leak_chance_per_threat).min(cfg.max_leak_chance)
}

pub fn roll_leak<R: Rng>(threat: f64, cfg: &EfficiencyConfig, rng: &mut R) -> bool {
    let chance = leak_chance(threat, cfg);
    chance > 0.0 && rng.gen::<f64>() < chance
}
