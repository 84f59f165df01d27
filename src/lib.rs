//! Hashguard - progression and economy balance engine
//!
//! Balance formulas, economy and threat models, loot and wave generation,
//! a deterministic scenario simulator and the analyses behind the `balance`
//! CLI. Every model reads one immutable [`core::BalanceConfig`].

pub mod analysis;
pub mod bosses;
pub mod build_info;
pub mod components;
pub mod core;
pub mod economy;
pub mod loot;
pub mod protocols;
pub mod simulator;
pub mod threat;
pub mod waves;
