//! Offline progression for a saved player profile.
//!
//! While the app is backgrounded the player earns hash at a reduced rate and
//! threat keeps growing slowly. Both are computed from the elapsed time,
//! clamped to the offline cap, when the profile is next opened.

use super::efficiency::EfficiencyState;
use super::production::{apply_production, hash_capacity, production_rate, project_offline_earnings};
use crate::components::ComponentLevels;
use crate::core::config::BalanceConfig;
use crate::core::error::Result;
use crate::threat::ThreatModel;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Lifetime counters carried on the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub total_hash_earned: f64,
    pub total_hash_spent: f64,
    pub total_offline_seconds: i64,
    pub waves_completed: u32,
}

/// The subset of a saved profile the economy reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub hash: f64,
    pub components: ComponentLevels,
    pub cpu_tier: u32,
    pub threat: f64,
    pub efficiency: EfficiencyState,
    /// Unix timestamp (seconds) of the last time the profile was active.
    pub last_active: i64,
    #[serde(default)]
    pub stats: LifetimeStats,
}

impl PlayerProgress {
    pub fn new(config: &BalanceConfig, now: i64) -> Self {
        Self {
            hash: 0.0,
            components: ComponentLevels::new(),
            cpu_tier: 1,
            threat: config.threat.starting_threat,
            efficiency: EfficiencyState::new(),
            last_active: now,
            stats: LifetimeStats::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What happened while the player was away.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    /// Seconds actually credited after the offline cap.
    pub credited_seconds: i64,
    pub hash_per_second: f64,
    pub hash_earned: f64,
    /// Projected earnings lost to the storage cap.
    pub hash_discarded: f64,
    pub threat_before: f64,
    pub threat_after: f64,
}

/// Apply offline earnings and threat growth for the time between
/// `progress.last_active` and `now`, then mark the profile active at `now`.
pub fn apply_offline_progress(progress: &mut PlayerProgress, now: i64, config: &BalanceConfig) -> OfflineReport {
    let elapsed_seconds = now.saturating_sub(progress.last_active);
    if elapsed_seconds <= 0 {
        return OfflineReport::default();
    }

    let max_offline = config.hash_economy.max_offline_seconds();
    let credited_seconds = (elapsed_seconds as f64).min(max_offline);

    let efficiency = progress.efficiency.efficiency(&config.efficiency);
    let rate = production_rate(&progress.components, progress.cpu_tier, efficiency, config);
    let projected = project_offline_earnings(
        rate,
        config.hash_economy.offline_earnings_rate,
        elapsed_seconds as f64,
        max_offline,
    );

    let capacity = hash_capacity(&progress.components, config);
    let outcome = apply_production(progress.hash, projected, 1.0, capacity);

    let threat_model = ThreatModel::new(&config.threat);
    let threat_before = progress.threat;
    let threat_after = threat_model.advance_offline(threat_before, credited_seconds);

    progress.hash = outcome.balance;
    progress.threat = threat_after;
    progress.last_active = now;
    progress.stats.total_hash_earned += outcome.credited;
    progress.stats.total_offline_seconds = progress.stats.total_offline_seconds.saturating_add(elapsed_seconds);

    tracing::info!(
        elapsed_seconds,
        earned = outcome.credited,
        capped = outcome.capped,
        "applied offline progress"
    );

    OfflineReport {
        elapsed_seconds,
        credited_seconds: credited_seconds as i64,
        hash_per_second: rate,
        hash_earned: outcome.credited,
        hash_discarded: (projected - outcome.credited).max(0.0),
        threat_before,
        threat_after,
    }
}

/// Apply offline progress up to the current wall-clock time.
pub fn process_offline_progression(progress: &mut PlayerProgress, config: &BalanceConfig) -> OfflineReport {
    apply_offline_progress(progress, Utc::now().timestamp(), config)
}
