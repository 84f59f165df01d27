//! Hash economy: production, storage, efficiency, power grid and offline earnings.

pub mod efficiency;
pub mod offline;
pub mod power;
pub mod production;

pub use efficiency::EfficiencyState;
pub use offline::{apply_offline_progress, process_offline_progression, OfflineReport, PlayerProgress};
pub use power::{max_towers, placement_cost, powered_slots, tower_power_draw, PlacementResult, TowerPlacement};
pub use production::*;
