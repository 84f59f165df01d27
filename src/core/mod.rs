//! Balance configuration, constants and shared scaling formulas.

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;

pub use config::BalanceConfig;
pub use error::{ConfigError, Result};
