//! Scenario report generation.

use super::config::{ScenarioConfig, Strategy};
use super::state::SimState;
use crate::core::config::BalanceConfig;
use crate::threat::EnemyArchetype;
use serde::Serialize;

/// Storage-capped share of a run above which an insight is raised.
const CAPPED_SHARE_WARNING: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Event,
    Interval,
    Final,
}

/// One row of the scenario log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub kind: LineKind,
    pub elapsed_seconds: f64,
    pub hash: f64,
    pub threat: f64,
    pub efficiency: f64,
    pub towers: u32,
    pub power_used: u32,
    pub upgrades: u32,
    pub sectors: u32,
    pub events: Vec<String>,
}

impl ReportLine {
    pub fn capture(state: &SimState, config: &BalanceConfig, kind: LineKind) -> Self {
        Self {
            kind,
            elapsed_seconds: state.elapsed_seconds,
            hash: state.hash,
            threat: state.threat,
            efficiency: state.efficiency_percent(config),
            towers: state.towers.count(),
            power_used: state.towers.power_used,
            upgrades: state.upgrades,
            sectors: state.sectors_unlocked,
            events: state.events.iter().map(|e| e.describe()).collect(),
        }
    }
}

/// First-time markers collected while the run progresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Milestones {
    pub first_upgrade_at: Option<f64>,
    pub first_tower_at: Option<f64>,
    pub first_storage_full_at: Option<f64>,
    pub unlocks: Vec<(EnemyArchetype, f64)>,
    pub efficiency_warnings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub strategy: Strategy,
    pub duration_seconds: u64,
    pub seed: u64,
    pub initial: SimState,
    pub final_state: SimState,
    pub lines: Vec<ReportLine>,
    pub milestones: Milestones,
    pub insights: Vec<String>,
}

impl ScenarioReport {
    pub fn build(
        scenario: &ScenarioConfig,
        initial: SimState,
        final_state: SimState,
        lines: Vec<ReportLine>,
        milestones: Milestones,
        config: &BalanceConfig,
    ) -> Self {
        let insights = scenario_insights(scenario, &final_state, &milestones, config);
        Self {
            strategy: scenario.strategy,
            duration_seconds: scenario.duration_seconds,
            seed: scenario.seed,
            initial,
            final_state,
            lines,
            milestones,
            insights,
        }
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();
        let end = &self.final_state;

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str(&format!(
            "          SCENARIO: {} for {}s (seed {})\n",
            self.strategy.key().to_uppercase(),
            self.duration_seconds,
            self.seed
        ));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str("── TIMELINE ─────────────────────────────────────────────────────\n");
        report.push_str("      Time       Hash  Threat   Eff%  Towers  Upg  Events\n");
        for line in &self.lines {
            let marker = match line.kind {
                LineKind::Event => " ",
                LineKind::Interval => "·",
                LineKind::Final => "=",
            };
            report.push_str(&format!(
                "{} {:>8}  {:>9.1}  {:>6.2}  {:>5.0}  {:>6}  {:>3}  {}\n",
                marker,
                format_duration(line.elapsed_seconds),
                line.hash,
                line.threat,
                line.efficiency,
                line.towers,
                line.upgrades,
                line.events.join("; ")
            ));
        }
        report.push('\n');

        report.push_str("── SUMMARY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Hash:            {:.1}\n", end.hash));
        report.push_str(&format!("  Total Earned:    {:.1}\n", end.total_earned));
        report.push_str(&format!("  Total Spent:     {:.1}\n", end.total_spent));
        report.push_str(&format!("  Threat:          {:.2}\n", end.threat));
        report.push_str(&format!("  Upgrades:        {}\n", end.upgrades));
        report.push_str(&format!("  CPU Tier:        {}\n", end.cpu_tier));
        report.push_str(&format!(
            "  Towers:          {} ({}W)\n",
            end.towers.count(),
            end.towers.power_used
        ));
        report.push_str(&format!("  Sectors:         {}\n", end.sectors_unlocked));
        report.push_str(&format!("  Leaks (total):   {}\n\n", end.total_leaks));

        if !self.insights.is_empty() {
            report.push_str("── INSIGHTS ─────────────────────────────────────────────────────\n");
            for insight in &self.insights {
                report.push_str(&format!("  ⚠️  {}\n", insight));
            }
            report.push('\n');
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn scenario_insights(
    scenario: &ScenarioConfig,
    end: &SimState,
    milestones: &Milestones,
    config: &BalanceConfig,
) -> Vec<String> {
    let mut insights = Vec::new();
    let duration = scenario.duration_seconds as f64;
    if duration <= 0.0 {
        return insights;
    }

    if scenario.strategy != Strategy::Passive && end.upgrades == 0 {
        insights.push(format!(
            "No upgrade affordable within {} - first upgrade costs may be too high",
            format_duration(duration)
        ));
    }

    let capped_share = end.capped_seconds / duration;
    if capped_share > CAPPED_SHARE_WARNING {
        insights.push(format!(
            "Storage was full for {:.0}% of the run - production wasted",
            capped_share * 100.0
        ));
    }

    if milestones.efficiency_warnings > 0 {
        insights.push(format!(
            "Efficiency dropped to the {:.0}% warning threshold {} time(s)",
            config.efficiency.warning_threshold, milestones.efficiency_warnings
        ));
    }

    if let Some((_, at)) = milestones.unlocks.iter().find(|(a, _)| *a == EnemyArchetype::Boss) {
        if end.towers.count() == 0 {
            insights.push(format!(
                "Boss enemies unlocked at {} with no towers placed",
                format_duration(*at)
            ));
        }
    }

    insights
}

/// `1h02m03s` style.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}h{:02}m{:02}s", h, m, s)
    } else if m > 0 {
        format!("{}m{:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::run_scenario;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5.0), "5s");
        assert_eq!(format_duration(125.0), "2m05s");
        assert_eq!(format_duration(3_723.0), "1h02m03s");
    }

    #[test]
    fn test_text_report_has_sections() {
        let config = BalanceConfig::default();
        let scenario = ScenarioConfig::new(Strategy::Active, 300, &config);
        let report = run_scenario(&scenario, &config);
        let text = report.to_text();
        assert!(text.contains("SCENARIO: ACTIVE"));
        assert!(text.contains("SUMMARY"));
    }

    #[test]
    fn test_json_report_parses() {
        let config = BalanceConfig::default();
        let scenario = ScenarioConfig::new(Strategy::Speedrun, 120, &config);
        let report = run_scenario(&scenario, &config);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["strategy"], "speedrun");
        assert!(value["lines"].as_array().is_some_and(|l| !l.is_empty()));
    }

    #[test]
    fn test_idle_storage_raises_insight() {
        let config = BalanceConfig::default();
        // Passive never spends, so the 1000-hash cap fills after ~17 minutes
        let scenario = ScenarioConfig::new(Strategy::Passive, 3_600, &config);
        let report = run_scenario(&scenario, &config);
        assert!(report.insights.iter().any(|i| i.contains("Storage was full")));
    }
}
