//! Balance analyses behind the `balance` CLI.
//!
//! Each analysis is a plain serializable struct of rows plus free-text
//! insights raised by threshold checks. Text rendering lives next to the data;
//! JSON output is the struct itself.

pub mod bosses;
pub mod components;
pub mod hash;
pub mod loot;
pub mod power;
pub mod protocols;
pub mod reference;
pub mod sync;
pub mod threat;
pub mod waves;

pub use bosses::BossAnalysis;
pub use components::ComponentAnalysis;
pub use hash::HashAnalysis;
pub use loot::LootAnalysis;
pub use power::PowerAnalysis;
pub use protocols::ProtocolAnalysis;
pub use reference::{render_reference_html, write_reference};
pub use sync::{check_sync, SyncEntry, SyncReport, SyncStatus};
pub use threat::ThreatAnalysis;
pub use waves::WaveAnalysis;

use crate::core::config::BalanceConfig;
use serde::Serialize;

/// Width of section rules in text output.
const RULE_WIDTH: usize = 65;

/// Shared rendering for every analysis.
pub trait Analysis: Serialize {
    fn title(&self) -> &'static str;

    fn insights(&self) -> &[String];

    /// Table body without header or insights.
    fn body_text(&self) -> String;

    fn to_text(&self) -> String {
        let mut out = section_header(self.title());
        out.push_str(&self.body_text());
        if !self.insights().is_empty() {
            out.push('\n');
            for insight in self.insights() {
                out.push_str(&format!("  ⚠️  {}\n", insight));
            }
        }
        out.push('\n');
        out
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// `── TITLE ─────...` padded to a fixed width.
pub fn section_header(title: &str) -> String {
    let lead = format!("── {} ", title.to_uppercase());
    let fill = RULE_WIDTH.saturating_sub(lead.chars().count());
    format!("{}{}\n", lead, "─".repeat(fill))
}

/// Options for the analyses that take parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOptions {
    pub wave_count: u32,
    pub loot_kills: u64,
    pub seed: u64,
}

impl AnalysisOptions {
    pub fn new(config: &BalanceConfig) -> Self {
        Self {
            wave_count: waves::DEFAULT_WAVE_COUNT,
            loot_kills: loot::DEFAULT_KILLS,
            seed: config.simulation.default_seed,
        }
    }
}

/// Every analysis at once.
#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub protocols: ProtocolAnalysis,
    pub hash: HashAnalysis,
    pub power: PowerAnalysis,
    pub threat: ThreatAnalysis,
    pub bosses: BossAnalysis,
    pub waves: WaveAnalysis,
    pub components: ComponentAnalysis,
    pub loot: LootAnalysis,
}

impl FullReport {
    pub fn build(config: &BalanceConfig, options: &AnalysisOptions) -> Self {
        Self {
            protocols: ProtocolAnalysis::build(config),
            hash: HashAnalysis::build(config),
            power: PowerAnalysis::build(config),
            threat: ThreatAnalysis::build(config),
            bosses: BossAnalysis::build(config),
            waves: WaveAnalysis::build(options.wave_count, config),
            components: ComponentAnalysis::build(config),
            loot: LootAnalysis::build(None, options.loot_kills, options.seed, config),
        }
    }

    pub fn to_text(&self) -> String {
        [
            self.protocols.to_text(),
            self.hash.to_text(),
            self.power.to_text(),
            self.threat.to_text(),
            self.bosses.to_text(),
            self.waves.to_text(),
            self.components.to_text(),
            self.loot.to_text(),
        ]
        .concat()
    }

    pub fn all_insights(&self) -> Vec<&String> {
        self.protocols
            .insights()
            .iter()
            .chain(self.hash.insights())
            .chain(self.power.insights())
            .chain(self.threat.insights())
            .chain(self.bosses.insights())
            .chain(self.waves.insights())
            .chain(self.components.insights())
            .chain(self.loot.insights())
            .collect()
    }
}
