//! Loot drops: weighted rarity rolls with diminishing returns and a pity
//! counter that guarantees a drop after a fixed run of misses.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
