//! Scenario simulator.
//!
//! Advances a single [`SimState`] in fixed one-second ticks under one of
//! three strategies:
//! - passive: no spending, random leaks scaled by threat
//! - active: towers first, then the cheapest offense/utility upgrade
//! - speedrun: economy upgrades, towers, then sector unlocks
//!
//! Leak rolls come from a `ChaCha8Rng` seeded per scenario, so a scenario and
//! seed always produce the same report.

mod config;
mod report;
mod runner;
mod state;
pub mod tick;

pub use config::{ScenarioConfig, Strategy};
pub use report::{format_duration, LineKind, Milestones, ReportLine, ScenarioReport};
pub use runner::run_scenario;
pub use state::{SimEvent, SimState};
