//! Deterministic wave generation plus the seeded per-slot type assignment.

use super::types::{BossUnit, CompositionShare, WaveDescriptor};
use crate::core::balance::{wave_health_multiplier, wave_speed_multiplier};
use crate::core::config::{WaveConfig, ZeroDayConfig};
use crate::threat::EnemyArchetype;
use rand::Rng;

/// `base + wave * per_wave`, saturating at `u32::MAX`.
pub fn enemy_count(wave: u32, cfg: &WaveConfig) -> u32 {
    cfg.base_enemy_count.saturating_add(wave.saturating_mul(cfg.enemies_per_wave))
}

/// `max(min_delay, base_delay - wave * reduction)`.
pub fn spawn_delay(wave: u32, cfg: &WaveConfig) -> f64 {
    (cfg.base_spawn_delay - wave as f64 * cfg.spawn_delay_reduction).max(cfg.min_spawn_delay)
}

pub fn hash_bonus(wave: u32, cfg: &WaveConfig) -> f64 {
    wave as f64 * cfg.hash_bonus_per_wave
}

pub fn is_boss_wave(wave: u32, cfg: &WaveConfig) -> bool {
    wave > 0 && wave % cfg.boss_interval.max(1) == 0
}

/// Archetype fractions for a wave's bracket: the last bracket starting at or
/// before `wave`. Fractions sum to 1.
pub fn bracket_composition(wave: u32, cfg: &WaveConfig) -> Vec<CompositionShare> {
    cfg.brackets
        .iter()
        .take_while(|bracket| bracket.from_wave <= wave)
        .last()
        .or_else(|| cfg.brackets.first())
        .map(|bracket| bracket.shares.clone())
        .unwrap_or_else(|| {
            vec![CompositionShare {
                archetype: EnemyArchetype::Basic,
                fraction: 1.0,
            }]
        })
}

pub fn describe_wave(wave: u32, cfg: &WaveConfig) -> WaveDescriptor {
    let wave = wave.max(1);
    let health_multiplier = wave_health_multiplier(wave, cfg);
    let speed_multiplier = wave_speed_multiplier(wave, cfg);
    let boss = is_boss_wave(wave, cfg).then(|| BossUnit {
        health_multiplier: health_multiplier * cfg.boss_health_multiplier,
        speed_multiplier: speed_multiplier * cfg.boss_speed_multiplier,
    });

    WaveDescriptor {
        wave,
        enemy_count: enemy_count(wave, cfg),
        composition: bracket_composition(wave, cfg),
        health_multiplier,
        speed_multiplier,
        spawn_delay: spawn_delay(wave, cfg),
        hash_bonus: hash_bonus(wave, cfg),
        boss,
    }
}

/// Descriptors for waves `1..=count`.
pub fn describe_waves(count: u32, cfg: &WaveConfig) -> Vec<WaveDescriptor> {
    (1..=count).map(|w| describe_wave(w, cfg)).collect()
}

/// Expected per-archetype counts, split by largest remainder so they always
/// add up to `enemy_count`. The boss unit is not included.
pub fn expected_composition(descriptor: &WaveDescriptor) -> Vec<(EnemyArchetype, u32)> {
    let total = descriptor.enemy_count;
    let mut counts: Vec<(EnemyArchetype, u32, f64)> = descriptor
        .composition
        .iter()
        .map(|share| {
            let exact = share.fraction * total as f64;
            (share.archetype, exact.floor() as u32, exact - exact.floor())
        })
        .collect();

    let assigned: u32 = counts.iter().map(|(_, n, _)| *n).sum();
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|a, b| counts[*b].2.total_cmp(&counts[*a].2));
    for index in order.into_iter().cycle().take(total.saturating_sub(assigned) as usize) {
        counts[index].1 += 1;
    }

    counts.into_iter().map(|(archetype, n, _)| (archetype, n)).collect()
}

/// Pick an archetype for every spawn slot, weighted by the bracket fractions.
/// The boss unit, if any, is always the last slot.
pub fn assign_enemy_types<R: Rng>(descriptor: &WaveDescriptor, rng: &mut R) -> Vec<EnemyArchetype> {
    let mut slots = Vec::with_capacity(descriptor.total_spawns() as usize);
    for _ in 0..descriptor.enemy_count {
        let roll = rng.gen::<f64>();
        let mut cumulative = 0.0;
        let mut picked = EnemyArchetype::Basic;
        for share in &descriptor.composition {
            cumulative += share.fraction;
            picked = share.archetype;
            if roll < cumulative {
                break;
            }
        }
        slots.push(picked);
    }
    if descriptor.is_boss_wave() {
        slots.push(EnemyArchetype::Boss);
    }
    slots
}

/// Zero-Day can only appear once enough waves have been cleared.
pub fn zero_day_can_spawn(waves_completed: u32, cfg: &ZeroDayConfig) -> bool {
    waves_completed >= cfg.min_waves_before_spawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_enemy_count_grows() {
        let cfg = WaveConfig::default();
        assert_eq!(enemy_count(1, &cfg), cfg.base_enemy_count + cfg.enemies_per_wave);
        assert!(enemy_count(10, &cfg) > enemy_count(9, &cfg));
    }

    #[test]
    fn test_spawn_delay_floor() {
        let cfg = WaveConfig::default();
        assert!(spawn_delay(2, &cfg) < spawn_delay(1, &cfg));
        assert_eq!(spawn_delay(10_000, &cfg), cfg.min_spawn_delay);
    }

    #[test]
    fn test_boss_cadence() {
        let cfg = WaveConfig::default();
        let bosses: Vec<u32> = (1..=20).filter(|w| describe_wave(*w, &cfg).is_boss_wave()).collect();
        assert_eq!(bosses, vec![5, 10, 15, 20]);
    }

    #[test]
    fn test_boss_multiplier_stacks_on_wave() {
        let cfg = WaveConfig::default();
        let desc = describe_wave(10, &cfg);
        let boss = desc.boss.unwrap();
        assert!((boss.health_multiplier - desc.health_multiplier * cfg.boss_health_multiplier).abs() < 1e-12);
        assert_eq!(desc.total_spawns(), desc.enemy_count + 1);
    }

    #[test]
    fn test_enemy_count_saturates() {
        let cfg = WaveConfig::default();
        assert_eq!(enemy_count(u32::MAX, &cfg), u32::MAX);
        assert_eq!(enemy_count(2_200_000_000, &cfg), u32::MAX);

        let huge = WaveConfig {
            enemies_per_wave: u32::MAX,
            ..WaveConfig::default()
        };
        assert_eq!(enemy_count(3, &huge), u32::MAX);
        assert_eq!(describe_wave(u32::MAX, &cfg).total_spawns(), u32::MAX);
    }

    #[test]
    fn test_brackets() {
        let cfg = WaveConfig::default();
        assert_eq!(bracket_composition(2, &cfg).len(), 1);
        assert_eq!(bracket_composition(5, &cfg)[1].archetype, EnemyArchetype::Fast);
        assert!(bracket_composition(8, &cfg).iter().any(|s| s.archetype == EnemyArchetype::Tank));
        for wave in [1, 4, 7, 11, 40] {
            let total: f64 = bracket_composition(wave, &cfg).iter().map(|s| s.fraction).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bracket_boundaries() {
        let cfg = WaveConfig::default();
        assert_eq!(bracket_composition(3, &cfg).len(), 1);
        assert_eq!(bracket_composition(4, &cfg).len(), 2);
        assert_eq!(bracket_composition(10, &cfg).len(), 3);
        assert_eq!(bracket_composition(11, &cfg).len(), 5);
        // Wave 0 falls back to the first bracket.
        assert_eq!(bracket_composition(0, &cfg), bracket_composition(1, &cfg));
    }

    #[test]
    fn test_expected_composition_sums() {
        let cfg = WaveConfig::default();
        for wave in 1..=25 {
            let desc = describe_wave(wave, &cfg);
            let total: u32 = expected_composition(&desc).iter().map(|(_, n)| n).sum();
            assert_eq!(total, desc.enemy_count);
        }
    }

    #[test]
    fn test_assignment_respects_bracket() {
        let cfg = WaveConfig::default();
        let desc = describe_wave(5, &cfg);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let slots = assign_enemy_types(&desc, &mut rng);

        assert_eq!(slots.len() as u32, desc.total_spawns());
        assert_eq!(slots.last(), Some(&EnemyArchetype::Boss));
        assert!(slots[..slots.len() - 1]
            .iter()
            .all(|a| matches!(a, EnemyArchetype::Basic | EnemyArchetype::Fast)));
    }

    #[test]
    fn test_assignment_seeded() {
        let cfg = WaveConfig::default();
        let desc = describe_wave(12, &cfg);
        let a = assign_enemy_types(&desc, &mut ChaCha8Rng::seed_from_u64(1));
        let b = assign_enemy_types(&desc, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_day_gate() {
        let cfg = ZeroDayConfig::default();
        assert!(!zero_day_can_spawn(cfg.min_waves_before_spawn - 1, &cfg));
        assert!(zero_day_can_spawn(cfg.min_waves_before_spawn, &cfg));
    }
}
