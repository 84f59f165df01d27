use thiserror::Error;

/// Misconfiguration of the balance tooling.
///
/// Running out of hash or power is not an error; see
/// [`crate::components::PurchaseResult`] and [`crate::economy::PlacementResult`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Unknown rarity: {0}")]
    UnknownRarity(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid balance config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
