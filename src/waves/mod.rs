//! Wave generation.
//!
//! Wave size, scaling, spawn timing and rewards are pure functions of the
//! wave number. Only the per-slot archetype pick uses randomness.

pub mod generation;
pub mod types;

pub use generation::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WaveConfig;

    #[test]
    fn test_wave_completes_only_when_all_resolved() {
        let desc = describe_wave(1, &WaveConfig::default());
        let mut progress = WaveProgress::new(&desc);

        while progress.record_spawn() {}
        assert!(!progress.is_complete());

        for i in 0..progress.total {
            if i % 3 == 0 {
                progress.record_leak();
            } else {
                progress.record_kill();
            }
        }
        assert!(progress.is_complete());
        assert_eq!(progress.alive(), 0);
    }

    #[test]
    fn test_not_complete_before_all_spawned() {
        let desc = describe_wave(3, &WaveConfig::default());
        let mut progress = WaveProgress::new(&desc);
        progress.record_spawn();
        progress.record_kill();
        assert_eq!(progress.alive(), 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_cannot_resolve_unspawned() {
        let desc = describe_wave(1, &WaveConfig::default());
        let mut progress = WaveProgress::new(&desc);
        progress.record_kill();
        progress.record_leak();
        assert_eq!(progress.resolved(), 0);
    }
}
