pub mod app;
pub mod auth;
pub mod avatar;
pub mod server;

use thiserror::Error;

pub use app::{ApiConfig, AppConfig, AppMetadata};
pub use auth::{Argon2Config, AuthConfig, JwtAlgorithm, JwtConfig};
pub use avatar::AvatarConfig;
pub use server::{DatabaseConfig, LogFormat, MetricsConfig, ObservabilityConfig, ServerConfig};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Sanity checks run after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
