//! Cyberboss phases and Zero-Day pressure.

use super::Analysis;
use crate::bosses::{cyberboss_health, kill_time, phase_bands, restore_leaks, zero_day_stats, PhaseBand, ZeroDayStats};
use crate::components::ComponentLevels;
use crate::core::config::BalanceConfig;
use crate::economy::{max_towers, tower_power_draw};
use crate::protocols::{protocol_stats, ProtocolKind};
use crate::simulator::format_duration;
use serde::Serialize;

const SAMPLE_THREATS: [f64; 5] = [1.0, 5.0, 10.0, 20.0, 50.0];

#[derive(Debug, Clone, Serialize)]
pub struct CyberbossRow {
    pub threat: f64,
    pub health: f64,
    pub phases: Vec<PhaseBand>,
    /// Seconds to kill with the reference defense.
    pub kill_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZeroDayRow {
    pub threat: f64,
    pub stats: ZeroDayStats,
    pub kill_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BossAnalysis {
    /// DPS of a full starting grid of level-1 Kernel Pulse towers.
    pub reference_dps: f64,
    pub cyberboss: Vec<CyberbossRow>,
    pub zero_day: Vec<ZeroDayRow>,
    pub zero_day_min_waves: u32,
    /// Seconds for a Zero-Day to drag full efficiency down to the warning level.
    pub zero_day_seconds_to_warning: f64,
    pub zero_day_restore_leaks: u32,
    pub insights: Vec<String>,
}

/// DPS of as many level-1 Kernel Pulse towers as a fresh grid can hold.
pub fn reference_dps(config: &BalanceConfig) -> f64 {
    let kind = ProtocolKind::KernelPulse;
    let draw = tower_power_draw(kind.rarity(), &config.power_grid);
    let towers = max_towers(&ComponentLevels::new(), draw, config);
    protocol_stats(kind, 1, &config.protocols).dps * towers as f64
}

impl BossAnalysis {
    pub fn build(config: &BalanceConfig) -> Self {
        let bosses = &config.bosses;
        let threat_cfg = &config.threat;
        let dps = reference_dps(config);

        let cyberboss: Vec<CyberbossRow> = SAMPLE_THREATS
            .iter()
            .map(|&threat| {
                let health = cyberboss_health(threat, &bosses.cyberboss, threat_cfg);
                CyberbossRow {
                    threat,
                    health,
                    phases: phase_bands(health, &bosses.cyberboss),
                    kill_seconds: kill_time(health, dps),
                }
            })
            .collect();

        let zero_day: Vec<ZeroDayRow> = SAMPLE_THREATS
            .iter()
            .map(|&threat| {
                let stats = zero_day_stats(threat, &bosses.zero_day, threat_cfg);
                ZeroDayRow {
                    threat,
                    stats,
                    kill_seconds: kill_time(stats.health, dps),
                }
            })
            .collect();

        let eff = &config.efficiency;
        let drain = bosses.zero_day.efficiency_drain_rate;
        let seconds_to_warning = if drain > 0.0 {
            (100.0 - eff.warning_threshold).max(0.0) / drain
        } else {
            f64::INFINITY
        };

        let mut insights = Vec::new();
        for row in zero_day.iter().filter(|r| r.kill_seconds > seconds_to_warning) {
            insights.push(format!(
                "At threat {:.0} a Zero-Day takes {} to kill but reaches the efficiency warning in {}",
                row.threat,
                format_duration(row.kill_seconds),
                format_duration(seconds_to_warning)
            ));
        }
        if let Some(last) = cyberboss.last() {
            if last.kill_seconds > 600.0 {
                insights.push(format!(
                    "Cyberboss at threat {:.0} needs {} against a starting grid",
                    last.threat,
                    format_duration(last.kill_seconds)
                ));
            }
        }

        Self {
            reference_dps: dps,
            cyberboss,
            zero_day,
            zero_day_min_waves: bosses.zero_day.min_waves_before_spawn,
            zero_day_seconds_to_warning: seconds_to_warning,
            zero_day_restore_leaks: restore_leaks(&bosses.zero_day, eff),
            insights,
        }
    }
}

impl Analysis for BossAnalysis {
    fn title(&self) -> &'static str {
        "Bosses"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("  Reference DPS: {:.1}\n\n", self.reference_dps));
        out.push_str("  Cyberboss  Threat      HP    P1 HP    P2 HP    P3 HP    P4 HP   Kill\n");
        for row in &self.cyberboss {
            let phases: Vec<String> = row.phases.iter().map(|p| format!("{:>7.0}", p.hp())).collect();
            out.push_str(&format!(
                "             {:>5.0}  {:>7.0}  {}  {}\n",
                row.threat,
                row.health,
                phases.join("  "),
                format_duration(row.kill_seconds)
            ));
        }
        out.push('\n');
        out.push_str(&format!(
            "  Zero-Day: spawns after wave {}, warning in {}, defeat repairs {} leaks\n",
            self.zero_day_min_waves,
            format_duration(self.zero_day_seconds_to_warning),
            self.zero_day_restore_leaks
        ));
        out.push_str("  Threat       HP   Speed   Kill\n");
        for row in &self.zero_day {
            out.push_str(&format!(
                "  {:>6.0}  {:>7.0}  {:>6.1}   {}\n",
                row.threat,
                row.stats.health,
                row.stats.speed,
                format_duration(row.kill_seconds)
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_dps_positive() {
        assert!(reference_dps(&BalanceConfig::default()) > 0.0);
    }

    #[test]
    fn test_cyberboss_rows_have_four_phases() {
        let analysis = BossAnalysis::build(&BalanceConfig::default());
        assert!(analysis.cyberboss.iter().all(|r| r.phases.len() == 4));
        assert!(analysis
            .cyberboss
            .windows(2)
            .all(|w| w[1].kill_seconds >= w[0].kill_seconds));
    }

    #[test]
    fn test_zero_day_warning_time() {
        let config = BalanceConfig::default();
        let analysis = BossAnalysis::build(&config);
        let expected = (100.0 - config.efficiency.warning_threshold) / config.bosses.zero_day.efficiency_drain_rate;
        assert_eq!(analysis.zero_day_seconds_to_warning, expected);
        assert_eq!(analysis.zero_day_restore_leaks, 5);
    }
}
