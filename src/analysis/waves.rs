//! Wave-by-wave size, HP and hash payout.

use super::Analysis;
use crate::core::config::BalanceConfig;
use crate::threat::EnemyArchetype;
use crate::waves::{describe_waves, expected_composition};
use serde::Serialize;

pub const DEFAULT_WAVE_COUNT: u32 = 20;
/// Largest table `build` will produce.
pub const MAX_WAVE_COUNT: u32 = 1_000;

#[derive(Debug, Clone, Serialize)]
pub struct WaveRow {
    pub wave: u32,
    pub enemy_count: u32,
    pub boss: bool,
    pub health_multiplier: f64,
    pub speed_multiplier: f64,
    pub spawn_delay: f64,
    pub spawn_seconds: f64,
    pub composition: Vec<(EnemyArchetype, u32)>,
    /// Hit points of every spawn in the wave, boss included.
    pub total_hp: f64,
    /// Hash from kills plus the completion bonus.
    pub hash_reward: f64,
    pub cumulative_hash: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaveAnalysis {
    pub rows: Vec<WaveRow>,
    pub insights: Vec<String>,
}

impl WaveAnalysis {
    pub fn build(count: u32, config: &BalanceConfig) -> Self {
        let waves = &config.waves;
        let enemies = &config.enemies;
        let boss_health = EnemyArchetype::Boss.base_stats(enemies).health;
        let boss_reward = EnemyArchetype::Boss.base_stats(enemies).hash_reward;

        let mut cumulative = 0.0;
        let rows: Vec<WaveRow> = describe_waves(count.min(MAX_WAVE_COUNT), waves)
            .iter()
            .map(|desc| {
                let composition = expected_composition(desc);
                let mut total_hp: f64 = composition
                    .iter()
                    .map(|(a, n)| a.base_stats(enemies).health * desc.health_multiplier * *n as f64)
                    .sum();
                let mut hash_reward: f64 = composition
                    .iter()
                    .map(|(a, n)| a.base_stats(enemies).hash_reward * *n as f64)
                    .sum::<f64>()
                    + desc.hash_bonus;
                if let Some(boss) = desc.boss {
                    total_hp += boss_health * boss.health_multiplier;
                    hash_reward += boss_reward;
                }
                cumulative += hash_reward;
                WaveRow {
                    wave: desc.wave,
                    enemy_count: desc.total_spawns(),
                    boss: desc.is_boss_wave(),
                    health_multiplier: desc.health_multiplier,
                    speed_multiplier: desc.speed_multiplier,
                    spawn_delay: desc.spawn_delay,
                    spawn_seconds: desc.spawn_duration(),
                    composition,
                    total_hp,
                    hash_reward,
                    cumulative_hash: cumulative,
                }
            })
            .collect();

        let mut insights = Vec::new();
        if let Some(floor) = rows.iter().find(|r| r.spawn_delay <= waves.min_spawn_delay) {
            insights.push(format!(
                "Spawn delay bottoms out at {:.2}s from wave {}",
                waves.min_spawn_delay, floor.wave
            ));
        }
        for pair in rows.windows(2).filter(|w| w[1].boss) {
            let jump = pair[1].total_hp / pair[0].total_hp.max(1.0);
            if jump > 2.0 {
                insights.push(format!(
                    "Boss wave {} has {:.1}x the HP of wave {}",
                    pair[1].wave, jump, pair[0].wave
                ));
            }
        }
        if let Some(tier_cost) = config.hash_economy.cpu_tier_costs.get(1) {
            match rows.iter().find(|r| r.cumulative_hash >= *tier_cost) {
                Some(row) => insights.push(format!(
                    "Wave rewards alone pay for CPU tier 2 by wave {}",
                    row.wave
                )),
                None => insights.push(format!(
                    "Wave rewards through wave {} do not cover CPU tier 2 ({:.0} hash)",
                    count, tier_cost
                )),
            }
        }

        Self { rows, insights }
    }
}

impl Analysis for WaveAnalysis {
    fn title(&self) -> &'static str {
        "Waves"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str("  Wave  Enemies  HP x   Spd x  Delay   Total HP   Reward   Cumulative  Mix\n");
        for row in &self.rows {
            let mix: Vec<String> = row
                .composition
                .iter()
                .filter(|(_, n)| *n > 0)
                .map(|(a, n)| format!("{}x{}", n, a.name()))
                .collect();
            let boss = if row.boss { " +boss" } else { "" };
            out.push_str(&format!(
                "  {:>4}  {:>7}  {:>4.2}  {:>5.2}  {:>5.2}  {:>9.0}  {:>7.0}  {:>11.0}  {}{}\n",
                row.wave,
                row.enemy_count,
                row.health_multiplier,
                row.speed_multiplier,
                row.spawn_delay,
                row.total_hp,
                row.hash_reward,
                row.cumulative_hash,
                mix.join(" "),
                boss
            ));
        }
        out
    }
}
