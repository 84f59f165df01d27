//! The nine upgradeable hardware components.
//!
//! Every component starts at level 1 and is bought up one level at a time
//! with hash. Levels never go down within a run.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
