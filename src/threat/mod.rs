//! Threat level: a difficulty scalar that only ever goes up.
//!
//! Threat grows with time played (and more slowly while offline), is capped
//! at `max_threat`, unlocks enemy archetypes as it crosses fixed thresholds,
//! and scales enemy health, speed and damage.

mod archetypes;

pub use archetypes::{enemy_stats_by_name, EnemyArchetype};

use crate::core::config::ThreatConfig;
use serde::Serialize;

/// Whether the player is actively playing or backgrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionMode {
    Online,
    Offline,
}

/// Named threshold bands, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ThreatBand {
    BasicOnly,
    PlusFast,
    PlusSwarm,
    PlusTank,
    PlusElite,
    PlusBoss,
}

impl ThreatBand {
    pub fn name(&self) -> &'static str {
        match self {
            ThreatBand::BasicOnly => "basic-only",
            ThreatBand::PlusFast => "+fast",
            ThreatBand::PlusSwarm => "+swarm",
            ThreatBand::PlusTank => "+tank",
            ThreatBand::PlusElite => "+elite",
            ThreatBand::PlusBoss => "+boss",
        }
    }
}

/// Threat transitions and queries over a borrowed config.
#[derive(Debug, Clone, Copy)]
pub struct ThreatModel<'a> {
    cfg: &'a ThreatConfig,
}

impl<'a> ThreatModel<'a> {
    pub fn new(cfg: &'a ThreatConfig) -> Self {
        Self { cfg }
    }

    pub fn growth_rate(&self, mode: SessionMode) -> f64 {
        match mode {
            SessionMode::Online => self.cfg.growth_per_second,
            SessionMode::Offline => self.cfg.growth_per_second * self.cfg.offline_fraction,
        }
    }

    /// `min(max_threat, threat + rate * dt)`. Never decreases.
    pub fn advance(&self, threat: f64, delta_seconds: f64, mode: SessionMode) -> f64 {
        let grown = threat + self.growth_rate(mode) * delta_seconds.max(0.0);
        grown.min(self.cfg.max_threat).max(threat)
    }

    pub fn advance_online(&self, threat: f64, delta_seconds: f64) -> f64 {
        self.advance(threat, delta_seconds, SessionMode::Online)
    }

    pub fn advance_offline(&self, threat: f64, delta_seconds: f64) -> f64 {
        self.advance(threat, delta_seconds, SessionMode::Offline)
    }

    pub fn is_unlocked(&self, archetype: EnemyArchetype, threat: f64) -> bool {
        archetype
            .unlock_threshold(&self.cfg.unlock_thresholds)
            .map_or(true, |threshold| threat >= threshold)
    }

    /// Archetypes available at `threat`, in unlock order.
    pub fn unlocked_archetypes(&self, threat: f64) -> Vec<EnemyArchetype> {
        EnemyArchetype::ALL
            .into_iter()
            .filter(|a| self.is_unlocked(*a, threat))
            .collect()
    }

    /// Archetypes that unlocked somewhere in `(before, after]`.
    pub fn newly_unlocked(&self, before: f64, after: f64) -> Vec<EnemyArchetype> {
        EnemyArchetype::ALL
            .into_iter()
            .filter(|a| !self.is_unlocked(*a, before) && self.is_unlocked(*a, after))
            .collect()
    }

    pub fn band(&self, threat: f64) -> ThreatBand {
        match self.unlocked_archetypes(threat).last() {
            Some(EnemyArchetype::Boss) => ThreatBand::PlusBoss,
            Some(EnemyArchetype::Elite) => ThreatBand::PlusElite,
            Some(EnemyArchetype::Tank) => ThreatBand::PlusTank,
            Some(EnemyArchetype::Swarm) => ThreatBand::PlusSwarm,
            Some(EnemyArchetype::Fast) => ThreatBand::PlusFast,
            Some(EnemyArchetype::Basic) | None => ThreatBand::BasicOnly,
        }
    }

    /// Seconds of play needed to go from `from` to `target`, or `None` if
    /// the target is above the cap or growth is zero.
    pub fn seconds_to_reach(&self, from: f64, target: f64, mode: SessionMode) -> Option<f64> {
        if target <= from {
            return Some(0.0);
        }
        let rate = self.growth_rate(mode);
        if target > self.cfg.max_threat || rate <= 0.0 {
            return None;
        }
        Some((target - from) / rate)
    }
}
