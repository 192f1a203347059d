pub mod network;
pub mod settings;

pub use network::*;
pub use settings::*;

/// Startup-time configuration failures. Request-time lookups use `AppError::ConfigNotFound`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },

    #[error("Network info error: {0}")]
    NetworkInfo(String),

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}
