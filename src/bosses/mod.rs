//! Boss tuning: the four-phase Cyberboss and the Zero-Day efficiency drainer.

use crate::core::balance::{threat_health_multiplier, threat_speed_multiplier};
use crate::core::config::{CyberbossConfig, EfficiencyConfig, ThreatConfig, ZeroDayConfig};
use crate::economy::EfficiencyState;
use serde::Serialize;

/// Floor applied to DPS before dividing, so a zero-damage defense reports a
/// very long but finite kill time.
const MIN_DPS: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum BossPhase {
    One,
    Two,
    Three,
    Four,
}

impl BossPhase {
    pub const ALL: [BossPhase; 4] = [BossPhase::One, BossPhase::Two, BossPhase::Three, BossPhase::Four];

    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }
}

/// Phase for a remaining-health fraction. A phase begins once health drops
/// to its threshold, so exactly 75% is already phase two.
pub fn phase_for_health_fraction(fraction: f64, cfg: &CyberbossConfig) -> BossPhase {
    let [p2, p3, p4] = cfg.phase_thresholds;
    if fraction > p2 {
        BossPhase::One
    } else if fraction > p3 {
        BossPhase::Two
    } else if fraction > p4 {
        BossPhase::Three
    } else {
        BossPhase::Four
    }
}

pub fn cyberboss_health(threat: f64, cyberboss: &CyberbossConfig, threat_cfg: &ThreatConfig) -> f64 {
    cyberboss.base_health * threat_health_multiplier(threat, threat_cfg)
}

/// Hit-point span covered by one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseBand {
    pub phase: BossPhase,
    /// Health when the phase starts.
    pub start_hp: f64,
    /// Health when the next phase takes over (0 for the last phase).
    pub end_hp: f64,
}

impl PhaseBand {
    pub fn hp(&self) -> f64 {
        self.start_hp - self.end_hp
    }
}

pub fn phase_bands(max_health: f64, cfg: &CyberbossConfig) -> Vec<PhaseBand> {
    let [p2, p3, p4] = cfg.phase_thresholds;
    let edges = [1.0, p2, p3, p4, 0.0];
    BossPhase::ALL
        .iter()
        .zip(edges.windows(2))
        .map(|(phase, pair)| PhaseBand {
            phase: *phase,
            start_hp: max_health * pair[0],
            end_hp: max_health * pair[1],
        })
        .collect()
}

/// Seconds to burn through `health` at `dps`.
pub fn kill_time(health: f64, dps: f64) -> f64 {
    health.max(0.0) / dps.max(MIN_DPS)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZeroDayStats {
    pub health: f64,
    pub speed: f64,
}

pub fn zero_day_stats(threat: f64, zero_day: &ZeroDayConfig, threat_cfg: &ThreatConfig) -> ZeroDayStats {
    ZeroDayStats {
        health: zero_day.base_health * threat_health_multiplier(threat, threat_cfg),
        speed: zero_day.speed * threat_speed_multiplier(threat, threat_cfg),
    }
}

/// Leaks equivalent to the efficiency restored on defeat.
pub fn restore_leaks(zero_day: &ZeroDayConfig, efficiency: &EfficiencyConfig) -> u32 {
    if efficiency.loss_per_leak <= 0.0 {
        return 0;
    }
    (zero_day.defeat_efficiency_restore / efficiency.loss_per_leak).round() as u32
}

/// Efficiency drain from a live Zero-Day. Drained percent accumulates and is
/// converted into leaks one `loss_per_leak` at a time, so efficiency stays a
/// pure function of the leak counter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ZeroDayDrain {
    pending_percent: f64,
    pub leaks_added: u32,
}

impl ZeroDayDrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain for `delta_seconds`. Returns the leaks added this call.
    pub fn tick(
        &mut self,
        delta_seconds: f64,
        state: &mut EfficiencyState,
        zero_day: &ZeroDayConfig,
        efficiency: &EfficiencyConfig,
    ) -> u32 {
        if efficiency.loss_per_leak <= 0.0 {
            return 0;
        }
        self.pending_percent += zero_day.efficiency_drain_rate * delta_seconds.max(0.0);
        let mut added = 0;
        while self.pending_percent >= efficiency.loss_per_leak {
            self.pending_percent -= efficiency.loss_per_leak;
            state.add_leak();
            added += 1;
        }
        self.leaks_added += added;
        added
    }
}

/// Outcome of killing a Zero-Day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZeroDayReward {
    pub hash_bonus: f64,
    pub leaks_removed: u32,
}

pub fn defeat_zero_day(state: &mut EfficiencyState, zero_day: &ZeroDayConfig, efficiency: &EfficiencyConfig) -> ZeroDayReward {
    let leaks_removed = state.remove_leaks(restore_leaks(zero_day, efficiency));
    tracing::debug!(leaks_removed, hash = zero_day.defeat_hash_bonus, "zero-day defeated");
    ZeroDayReward {
        hash_bonus: zero_day.defeat_hash_bonus,
        leaks_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries() {
        let cfg = CyberbossConfig::default();
        assert_eq!(phase_for_health_fraction(1.0, &cfg), BossPhase::One);
        assert_eq!(phase_for_health_fraction(0.76, &cfg), BossPhase::One);
        assert_eq!(phase_for_health_fraction(0.75, &cfg), BossPhase::Two);
        assert_eq!(phase_for_health_fraction(0.5, &cfg), BossPhase::Three);
        assert_eq!(phase_for_health_fraction(0.1, &cfg), BossPhase::Four);
        assert_eq!(phase_for_health_fraction(0.0, &cfg), BossPhase::Four);
    }

    #[test]
    fn test_phase_bands_cover_full_health() {
        let cfg = CyberbossConfig::default();
        let bands = phase_bands(5_000.0, &cfg);
        assert_eq!(bands.len(), 4);
        let total: f64 = bands.iter().map(|b| b.hp()).sum();
        assert!((total - 5_000.0).abs() < 1e-9);
        assert_eq!(bands[0].start_hp, 5_000.0);
        assert_eq!(bands[3].end_hp, 0.0);
    }

    #[test]
    fn test_cyberboss_scales_with_threat() {
        let boss = CyberbossConfig::default();
        let threat = ThreatConfig::default();
        assert_eq!(cyberboss_health(1.0, &boss, &threat), boss.base_health);
        assert!(cyberboss_health(10.0, &boss, &threat) > boss.base_health);
    }

    #[test]
    fn test_kill_time_zero_dps_is_finite() {
        assert!(kill_time(100.0, 0.0).is_finite());
        assert_eq!(kill_time(100.0, 50.0), 2.0);
    }

    #[test]
    fn test_drain_adds_leaks_per_loss_step() {
        let zero_day = ZeroDayConfig::default();
        let eff = EfficiencyConfig::default();
        let mut state = EfficiencyState::new();
        let mut drain = ZeroDayDrain::new();

        let seconds = eff.loss_per_leak / zero_day.efficiency_drain_rate;
        assert_eq!(drain.tick(seconds * 3.0, &mut state, &zero_day, &eff), 3);
        assert_eq!(state.leaks, 3);
    }

    #[test]
    fn test_defeat_restores_efficiency() {
        let zero_day = ZeroDayConfig::default();
        let eff = EfficiencyConfig::default();
        let mut state = EfficiencyState::with_leaks(8);

        let reward = defeat_zero_day(&mut state, &zero_day, &eff);

        assert_eq!(reward.leaks_removed, 5);
        assert_eq!(state.leaks, 3);
        assert_eq!(reward.hash_bonus, zero_day.defeat_hash_bonus);
    }

    #[test]
    fn test_restore_never_goes_below_zero_leaks() {
        let zero_day = ZeroDayConfig::default();
        let eff = EfficiencyConfig::default();
        let mut state = EfficiencyState::with_leaks(2);
        let reward = defeat_zero_day(&mut state, &zero_day, &eff);
        assert_eq!(reward.leaks_removed, 2);
        assert_eq!(state.efficiency(&eff), 100.0);
    }
}
