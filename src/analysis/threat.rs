//! Threat scaling and archetype unlock timing.

use super::Analysis;
use crate::core::balance::{threat_damage_multiplier, threat_health_multiplier, threat_speed_multiplier};
use crate::core::config::BalanceConfig;
use crate::simulator::format_duration;
use crate::threat::{EnemyArchetype, SessionMode, ThreatModel};
use serde::Serialize;

const SAMPLE_THREATS: [f64; 12] = [1.0, 2.0, 4.0, 5.0, 8.0, 10.0, 15.0, 20.0, 30.0, 50.0, 75.0, 100.0];

/// Unlocks reached later than this many hours of active play are flagged.
const SLOW_UNLOCK_HOURS: f64 = 4.0;

#[derive(Debug, Clone, Serialize)]
pub struct ThreatRow {
    pub threat: f64,
    pub band: &'static str,
    pub health_multiplier: f64,
    pub speed_multiplier: f64,
    pub damage_multiplier: f64,
    pub unlocked: Vec<EnemyArchetype>,
    /// Seconds of active play from the starting threat.
    pub online_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnlockRow {
    pub archetype: EnemyArchetype,
    pub threshold: f64,
    pub online_seconds: Option<f64>,
    pub offline_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreatAnalysis {
    pub rows: Vec<ThreatRow>,
    pub unlocks: Vec<UnlockRow>,
    pub insights: Vec<String>,
}

impl ThreatAnalysis {
    pub fn build(config: &BalanceConfig) -> Self {
        let cfg = &config.threat;
        let model = ThreatModel::new(cfg);
        let start = cfg.starting_threat;

        let rows = SAMPLE_THREATS
            .iter()
            .filter(|t| **t <= cfg.max_threat)
            .map(|&threat| ThreatRow {
                threat,
                band: model.band(threat).name(),
                health_multiplier: threat_health_multiplier(threat, cfg),
                speed_multiplier: threat_speed_multiplier(threat, cfg),
                damage_multiplier: threat_damage_multiplier(threat, cfg),
                unlocked: model.unlocked_archetypes(threat),
                online_seconds: model.seconds_to_reach(start, threat, SessionMode::Online),
            })
            .collect();

        let unlocks: Vec<UnlockRow> = EnemyArchetype::ALL
            .iter()
            .filter_map(|a| a.unlock_threshold(&cfg.unlock_thresholds).map(|t| (*a, t)))
            .map(|(archetype, threshold)| UnlockRow {
                archetype,
                threshold,
                online_seconds: model.seconds_to_reach(start, threshold, SessionMode::Online),
                offline_seconds: model.seconds_to_reach(start, threshold, SessionMode::Offline),
            })
            .collect();

        let mut insights = Vec::new();
        for unlock in &unlocks {
            match unlock.online_seconds {
                None => insights.push(format!(
                    "{} enemies never unlock: threshold {:.1} is above max threat",
                    unlock.archetype.name(),
                    unlock.threshold
                )),
                Some(secs) if secs > SLOW_UNLOCK_HOURS * 3600.0 => insights.push(format!(
                    "{} enemies take {} of active play to unlock",
                    unlock.archetype.name(),
                    format_duration(secs)
                )),
                Some(_) => {}
            }
        }

        Self { rows, unlocks, insights }
    }
}

impl Analysis for ThreatAnalysis {
    fn title(&self) -> &'static str {
        "Threat"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str("  Threat  Band         HP x   Spd x   Dmg x   Reached after\n");
        for row in &self.rows {
            let reached = row.online_seconds.map(format_duration).unwrap_or_else(|| "never".into());
            out.push_str(&format!(
                "  {:>6.1}  {:<11}  {:>5.2}  {:>6.2}  {:>6.2}   {}\n",
                row.threat, row.band, row.health_multiplier, row.speed_multiplier, row.damage_multiplier, reached
            ));
        }
        out.push('\n');
        out.push_str("  Archetype  Threshold     Online      Offline\n");
        for unlock in &self.unlocks {
            let online = unlock.online_seconds.map(format_duration).unwrap_or_else(|| "never".into());
            let offline = unlock.offline_seconds.map(format_duration).unwrap_or_else(|| "never".into());
            out.push_str(&format!(
                "  {:<9}  {:>9.1}  {:>9}  {:>11}\n",
                unlock.archetype.name(),
                unlock.threshold,
                online,
                offline
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_rows_skip_basic() {
        let analysis = ThreatAnalysis::build(&BalanceConfig::default());
        assert_eq!(analysis.unlocks.len(), 5);
        assert!(analysis.unlocks.iter().all(|u| u.archetype != EnemyArchetype::Basic));
    }

    #[test]
    fn test_offline_unlocks_take_longer() {
        let analysis = ThreatAnalysis::build(&BalanceConfig::default());
        for unlock in &analysis.unlocks {
            assert!(unlock.offline_seconds.unwrap() > unlock.online_seconds.unwrap());
        }
    }

    #[test]
    fn test_multipliers_monotonic() {
        let analysis = ThreatAnalysis::build(&BalanceConfig::default());
        assert!(analysis
            .rows
            .windows(2)
            .all(|w| w[1].health_multiplier >= w[0].health_multiplier));
    }
}
