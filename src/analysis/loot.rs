//! Drop rates, damping and pity across difficulties.

use super::Analysis;
use crate::core::config::BalanceConfig;
use crate::loot::{damped_probability, expected_drop_rate, simulate_drops, Difficulty, DropTally, Rarity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

pub const DEFAULT_KILLS: u64 = 10_000;

/// Cumulative kill counts the damping curve is sampled at.
const SAMPLE_KILLS: [u64; 6] = [0, 100, 1_000, 10_000, 100_000, 1_000_000];

/// Share of the fresh-profile drop rate below which the damping curve is flagged.
const LOW_RATE: f64 = 0.5;

#[derive(Debug, Clone, Serialize)]
pub struct RatePoint {
    pub cumulative_kills: u64,
    pub drop_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifficultyLoot {
    pub difficulty: Difficulty,
    pub multiplier: f64,
    /// Per-rarity chance on the first kill, rarest first.
    pub first_kill: Vec<(Rarity, f64)>,
    pub curve: Vec<RatePoint>,
    pub simulated: DropTally,
}

#[derive(Debug, Clone, Serialize)]
pub struct LootAnalysis {
    pub kills: u64,
    pub seed: u64,
    pub pity_threshold: u32,
    pub difficulties: Vec<DifficultyLoot>,
    pub insights: Vec<String>,
}

impl LootAnalysis {
    /// Analyse one difficulty, or all of them when `difficulty` is `None`.
    /// Each difficulty's Monte Carlo run starts from the same `seed`.
    pub fn build(difficulty: Option<Difficulty>, kills: u64, seed: u64, config: &BalanceConfig) -> Self {
        let cfg = &config.loot;
        let selected: Vec<Difficulty> = match difficulty {
            Some(d) => vec![d],
            None => Difficulty::ALL.to_vec(),
        };

        let difficulties: Vec<DifficultyLoot> = selected
            .into_iter()
            .map(|difficulty| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                DifficultyLoot {
                    difficulty,
                    multiplier: difficulty.multiplier(&cfg.difficulty),
                    first_kill: Rarity::RAREST_FIRST
                        .iter()
                        .map(|r| (*r, damped_probability(*r, 1, difficulty, cfg)))
                        .collect(),
                    curve: SAMPLE_KILLS
                        .iter()
                        .map(|&k| RatePoint {
                            cumulative_kills: k,
                            drop_rate: expected_drop_rate(k, difficulty, cfg),
                        })
                        .collect(),
                    simulated: simulate_drops(kills, difficulty, cfg, &mut rng),
                }
            })
            .collect();

        let mut insights = Vec::new();
        for entry in &difficulties {
            if let Some(point) = entry.curve.iter().find(|p| p.drop_rate < LOW_RATE * entry.curve[0].drop_rate) {
                insights.push(format!(
                    "{}: rolled drop rate halves by {} kills ({:.1}%)",
                    entry.difficulty.name(),
                    point.cumulative_kills,
                    point.drop_rate * 100.0
                ));
            }
            let tally = &entry.simulated;
            if tally.drops > 0 && tally.pity_drops * 4 > tally.drops {
                insights.push(format!(
                    "{}: pity supplies {:.0}% of drops over {} kills",
                    entry.difficulty.name(),
                    tally.pity_drops as f64 * 100.0 / tally.drops as f64,
                    tally.kills
                ));
            }
        }

        Self {
            kills,
            seed,
            pity_threshold: cfg.pity_threshold,
            difficulties,
            insights,
        }
    }
}

impl Analysis for LootAnalysis {
    fn title(&self) -> &'static str {
        "Loot"
    }

    fn insights(&self) -> &[String] {
        &self.insights
    }

    fn body_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "  Pity after {} dry kills; simulated {} kills (seed {})\n\n",
            self.pity_threshold, self.kills, self.seed
        ));
        for entry in &self.difficulties {
            out.push_str(&format!("  {} ({:.2}x)\n", entry.difficulty.name(), entry.multiplier));
            let first: Vec<String> = entry
                .first_kill
                .iter()
                .map(|(r, p)| format!("{} {:.2}%", r.name(), p * 100.0))
                .collect();
            out.push_str(&format!("    First kill: {}\n", first.join(", ")));
            let curve: Vec<String> = entry
                .curve
                .iter()
                .map(|p| format!("{}: {:.1}%", p.cumulative_kills, p.drop_rate * 100.0))
                .collect();
            out.push_str(&format!("    Drop rate by kills: {}\n", curve.join("  ")));
            let tally = &entry.simulated;
            out.push_str(&format!(
                "    Simulated: {} drops ({:.1}%), {} pity, C/R/E/L {}/{}/{}/{}, longest drought {}\n\n",
                tally.drops,
                tally.drop_rate() * 100.0,
                tally.pity_drops,
                tally.common,
                tally.rare,
                tally.epic,
                tally.legendary,
                tally.longest_drought
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_difficulties_by_default() {
        let analysis = LootAnalysis::build(None, 200, 1, &BalanceConfig::default());
        assert_eq!(analysis.difficulties.len(), 4);
        assert!(analysis.difficulties.iter().all(|d| d.simulated.kills == 200));
    }

    #[test]
    fn test_single_difficulty() {
        let analysis = LootAnalysis::build(Some(Difficulty::Hard), 100, 1, &BalanceConfig::default());
        assert_eq!(analysis.difficulties.len(), 1);
        assert_eq!(analysis.difficulties[0].difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = BalanceConfig::default();
        let a = LootAnalysis::build(Some(Difficulty::Normal), 2_000, 9, &config);
        let b = LootAnalysis::build(Some(Difficulty::Normal), 2_000, 9, &config);
        assert_eq!(a.difficulties[0].simulated, b.difficulties[0].simulated);
    }

    #[test]
    fn test_drought_never_reaches_pity() {
        let config = BalanceConfig::default();
        let analysis = LootAnalysis::build(None, 5_000, 4, &config);
        for entry in &analysis.difficulties {
            assert!(entry.simulated.longest_drought < config.loot.pity_threshold);
        }
    }
}
