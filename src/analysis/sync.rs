//! Drift check between the current config export and a saved reference export.

use crate::core::config::BalanceConfig;
use crate::core::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Relative tolerance for two values to count as equal.
const TOLERANCE: f64 = 0.001;

/// Export paths checked against the reference.
pub const SYNC_KEYS: &[&str] = &[
    "powerGrid.basePowerBudget",
    "powerGrid.towerPower.common",
    "powerGrid.towerPower.rare",
    "powerGrid.towerPower.epic",
    "powerGrid.towerPower.legendary",
    "threatLevel.healthScaling",
    "threatLevel.speedScaling",
    "threatLevel.damageScaling",
    "bosses.cyberboss.baseHealth",
    "bosses.cyberboss.phase2Threshold",
    "bosses.cyberboss.phase3Threshold",
    "bosses.cyberboss.phase4Threshold",
    "zeroDay.baseHealth",
    "zeroDay.speed",
    "zeroDay.efficiencyDrainRate",
    "zeroDay.minWavesBeforeSpawn",
    "zeroDay.defeatHashBonus",
    "zeroDay.defeatEfficiencyRestore",
    "hashEconomy.baseHashPerSecond",
    "hashEconomy.cpuLevelScaling",
    "hashEconomy.maxOfflineHours",
    "hashEconomy.offlineEarningsRate",
    "protocolScaling.rangePerLevel",
    "protocolScaling.fireRatePerLevel",
    "components.maxLevel",
    "components.baseCosts.psu",
    "components.baseCosts.ram",
    "components.baseCosts.gpu",
    "components.baseCosts.cache",
    "components.baseCosts.storage",
    "components.baseCosts.expansion",
    "components.baseCosts.network",
    "components.baseCosts.io",
    "components.baseCosts.cpu",
    "efficiency.leakDecayInterval",
    "efficiency.warningThreshold",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncStatus {
    Ok,
    Mismatch,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncEntry {
    pub key: String,
    pub status: SyncStatus,
    pub current: Option<f64>,
    pub reference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub entries: Vec<SyncEntry>,
}

/// `abs(a - b) <= abs(b) * 0.1%`; a zero reference needs an exact zero.
pub fn values_match(current: f64, reference: f64) -> bool {
    if reference == 0.0 {
        return current == 0.0;
    }
    (current - reference).abs() <= reference.abs() * TOLERANCE
}

/// Follow a dot path through objects and arrays. Numeric segments index arrays.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn lookup_number(value: &Value, path: &str) -> Option<f64> {
    lookup_path(value, path).and_then(Value::as_f64)
}

/// Compare every sync key of `config`'s export against `reference`.
pub fn check_sync(config: &BalanceConfig, reference: &Value) -> SyncReport {
    let export = config.export_json();
    let entries = SYNC_KEYS
        .iter()
        .map(|key| {
            let current = lookup_number(&export, key);
            let expected = lookup_number(reference, key);
            let status = match (current, expected) {
                (Some(a), Some(b)) if values_match(a, b) => SyncStatus::Ok,
                (Some(_), Some(_)) => SyncStatus::Mismatch,
                _ => SyncStatus::Skipped,
            };
            if status == SyncStatus::Mismatch {
                tracing::debug!(key, ?current, ?expected, "config drift");
            }
            SyncEntry {
                key: key.to_string(),
                status,
                current,
                reference: expected,
            }
        })
        .collect();
    SyncReport { entries }
}

/// Read a reference export from disk.
pub fn load_reference(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl SyncReport {
    pub fn count(&self, status: SyncStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    pub fn has_mismatches(&self) -> bool {
        self.count(SyncStatus::Mismatch) > 0
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Balance sync check: current config vs reference export\n");
        out.push_str(&format!("{}\n\n", "=".repeat(70)));
        for entry in &self.entries {
            match entry.status {
                SyncStatus::Ok => {}
                SyncStatus::Skipped => {
                    out.push_str(&format!("  SKIP      {} -- not found\n", entry.key));
                }
                SyncStatus::Mismatch => {
                    out.push_str(&format!("  MISMATCH  {}\n", entry.key));
                    out.push_str(&format!("            Current:   {}\n", fmt_value(entry.current)));
                    out.push_str(&format!("            Reference: {}\n\n", fmt_value(entry.reference)));
                }
            }
        }
        out.push_str(&format!("{}\n", "=".repeat(70)));
        out.push_str(&format!(
            "Results: {} OK, {} MISMATCH, {} SKIPPED\n",
            self.count(SyncStatus::Ok),
            self.count(SyncStatus::Mismatch),
            self.count(SyncStatus::Skipped)
        ));
        if self.has_mismatches() {
            out.push_str("FAIL: config has drifted from the reference export.\n");
        } else {
            out.push_str("PASS: all checked values are in sync.\n");
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn fmt_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_match_tolerance() {
        assert!(values_match(100.05, 100.0));
        assert!(!values_match(100.2, 100.0));
        assert!(values_match(0.0, 0.0));
        assert!(!values_match(0.0001, 0.0));
    }

    #[test]
    fn test_lookup_path_walks_arrays() {
        let value = json!({"a": {"b": [10, 20, {"c": 3}]}});
        assert_eq!(lookup_path(&value, "a.b.1"), Some(&json!(20)));
        assert_eq!(lookup_path(&value, "a.b.2.c"), Some(&json!(3)));
        assert_eq!(lookup_path(&value, "a.b.9"), None);
        assert_eq!(lookup_path(&value, "a.x"), None);
    }

    #[test]
    fn test_own_export_is_in_sync() {
        let config = BalanceConfig::default();
        let report = check_sync(&config, &config.export_json());
        assert!(!report.has_mismatches());
        assert_eq!(report.count(SyncStatus::Ok), SYNC_KEYS.len());
    }

    #[test]
    fn test_drift_and_missing_keys() {
        let config = BalanceConfig::default();
        let mut reference = config.export_json();
        reference["zeroDay"]["speed"] = json!(config.bosses.zero_day.speed * 2.0);
        reference["efficiency"]
            .as_object_mut()
            .unwrap()
            .remove("warningThreshold");

        let report = check_sync(&config, &reference);
        assert!(report.has_mismatches());
        assert_eq!(report.count(SyncStatus::Mismatch), 1);
        assert_eq!(report.count(SyncStatus::Skipped), 1);
        let text = report.to_text();
        assert!(text.contains("MISMATCH  zeroDay.speed"));
        assert!(text.contains("FAIL"));
    }
}
