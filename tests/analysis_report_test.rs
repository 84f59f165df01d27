//! Analysis and config tooling integration tests
//!
//! Builds every analysis from a config override and checks the JSON shapes
//! and sync behaviour the CLI relies on.

use hashguard::analysis::{
    check_sync, render_reference_html, Analysis, AnalysisOptions, FullReport, HashAnalysis, LootAnalysis,
    SyncStatus, WaveAnalysis,
};
use hashguard::core::{BalanceConfig, ConfigError};
use hashguard::loot::Difficulty;
use hashguard::threat::EnemyArchetype;
use hashguard::waves::describe_wave;

fn small_options(config: &BalanceConfig) -> AnalysisOptions {
    let mut options = AnalysisOptions::new(config);
    options.loot_kills = 300;
    options
}

#[test]
fn test_override_flows_into_analyses() {
    let config = BalanceConfig::from_toml_str(
        r#"
        [hash_economy]
        base_hash_per_second = 4.0
        "#,
    )
    .unwrap();
    let hash = HashAnalysis::build(&config);
    assert_eq!(hash.cpu_levels[0].hash_per_second, 4.0);
    assert_eq!(hash.cpu_levels[0].hash_per_hour, 14_400.0);
}

#[test]
fn test_bracket_override_changes_composition() {
    let config = BalanceConfig::from_toml_str(
        r#"
        [[waves.brackets]]
        from_wave = 1
        shares = [{ archetype = "basic", fraction = 1.0 }]

        [[waves.brackets]]
        from_wave = 3
        shares = [
            { archetype = "tank", fraction = 0.6 },
            { archetype = "swarm", fraction = 0.4 },
        ]
        "#,
    )
    .unwrap();

    let default_wave = describe_wave(3, &BalanceConfig::default().waves);
    assert_eq!(default_wave.composition.len(), 1);

    let wave = describe_wave(3, &config.waves);
    let archetypes: Vec<EnemyArchetype> = wave.composition.iter().map(|s| s.archetype).collect();
    assert_eq!(archetypes, vec![EnemyArchetype::Tank, EnemyArchetype::Swarm]);
    assert_eq!(describe_wave(40, &config.waves).composition, wave.composition);
    assert_eq!(config.waves.base_enemy_count, BalanceConfig::default().waves.base_enemy_count);
}

#[test]
fn test_bracket_override_must_sum_to_one() {
    let result = BalanceConfig::from_toml_str(
        r#"
        [[waves.brackets]]
        from_wave = 1
        shares = [{ archetype = "basic", fraction = 0.4 }]
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_invalid_override_is_rejected() {
    let result = BalanceConfig::from_toml_str(
        r#"
        [components]
        max_level = 0
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_full_report_json_has_every_section() {
    let config = BalanceConfig::default();
    let report = FullReport::build(&config, &small_options(&config));
    let json = serde_json::to_value(&report).unwrap();
    for key in ["protocols", "hash", "power", "threat", "bosses", "waves", "components", "loot"] {
        assert!(json[key]["insights"].is_array(), "{key} lacks insights");
    }
    assert_eq!(json["loot"]["kills"], 300);
}

#[test]
fn test_wave_analysis_json_rows() {
    let config = BalanceConfig::default();
    let analysis = WaveAnalysis::build(10, &config);
    let json = analysis.to_json();
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[4]["boss"], true);
    assert_eq!(rows[0]["boss"], false);
}

#[test]
fn test_loot_text_names_difficulty() {
    let config = BalanceConfig::default();
    let text = LootAnalysis::build(Some(Difficulty::Nightmare), 100, 3, &config).to_text();
    assert!(text.contains("── LOOT"));
    assert!(text.contains("Nightmare"));
    assert!(!text.contains("Easy"));
}

#[test]
fn test_sync_detects_changed_override() {
    let reference = BalanceConfig::default().export_json();
    let tuned = BalanceConfig::from_toml_str(
        r#"
        [efficiency]
        leak_decay_interval = 30.0
        "#,
    )
    .unwrap();

    let report = check_sync(&tuned, &reference);
    let mismatched: Vec<&str> = report
        .entries
        .iter()
        .filter(|e| e.status == SyncStatus::Mismatch)
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(mismatched, vec!["efficiency.leakDecayInterval"]);
}

#[test]
fn test_sync_within_tolerance_is_ok() {
    let config = BalanceConfig::default();
    let mut reference = config.export_json();
    let speed = config.bosses.zero_day.speed;
    reference["zeroDay"]["speed"] = serde_json::json!(speed * 1.0005);
    assert!(!check_sync(&config, &reference).has_mismatches());
}

#[test]
fn test_empty_reference_skips_everything() {
    let config = BalanceConfig::default();
    let report = check_sync(&config, &serde_json::json!({}));
    assert!(!report.has_mismatches());
    assert_eq!(report.count(SyncStatus::Skipped), report.entries.len());
}

#[test]
fn test_reference_html_contains_tables() {
    let config = BalanceConfig::default();
    let html = render_reference_html(&config, &small_options(&config));
    assert!(html.matches("<table>").count() >= 8);
    assert!(html.contains("Kernel Pulse"));
}
