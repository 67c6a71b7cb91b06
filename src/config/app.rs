use serde::{Deserialize, Serialize};

use super::{
    AuthConfig, AvatarConfig, ConfigError, DatabaseConfig, MetricsConfig, ObservabilityConfig,
    ServerConfig, Validate,
};

/// Environments in which a short development JWT secret is tolerated
const RELAXED_ENVIRONMENTS: [&str; 2] = ["development", "test"];

/// Minimum JWT secret length (bytes) everywhere else
pub const MIN_PRODUCTION_SECRET_LENGTH: usize = 32;

/// Top-level application configuration that aggregates all config modules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub app: AppMetadata,
    /// Server configuration (host, port, workers)
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration (url, pool, migrations)
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Observability configuration (log level and format)
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Metrics configuration (Prometheus endpoint)
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Authentication configuration (token lifetime, Argon2, JWT)
    #[serde(default)]
    pub auth: AuthConfig,
    /// Avatar upload limits
    #[serde(default)]
    pub avatar: AvatarConfig,
    /// API configuration (Swagger)
    #[serde(default)]
    pub api: ApiConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Application environment (development, test, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable Swagger UI
    #[serde(default = "default_swagger_enabled")]
    pub swagger_enabled: bool,
    /// Swagger UI path
    #[serde(default = "default_swagger_path")]
    pub swagger_path: String,
}

fn default_app_name() -> String {
    "accounts".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_swagger_enabled() -> bool {
    true
}

fn default_swagger_path() -> String {
    "/docs".to_string()
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: default_environment(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            swagger_enabled: default_swagger_enabled(),
            swagger_path: default_swagger_path(),
        }
    }
}

impl AppMetadata {
    pub fn is_relaxed(&self) -> bool {
        RELAXED_ENVIRONMENTS.contains(&self.environment.as_str())
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("app.name cannot be empty".to_string()));
        }
        if self.version.is_empty() {
            return Err(ConfigError::ValidationError("app.version cannot be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::ValidationError("app.environment cannot be empty".to_string()));
        }
        if self.shutdown_timeout == 0 {
            return Err(ConfigError::ValidationError("app.shutdown_timeout must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.swagger_enabled && !self.swagger_path.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "api.swagger_path must start with '/' when swagger is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.observability.validate()?;
        self.auth.validate()?;
        self.avatar.validate()?;
        self.api.validate()?;

        if !self.app.is_relaxed() && self.auth.jwt.secret.len() < MIN_PRODUCTION_SECRET_LENGTH {
            return Err(ConfigError::ValidationError(format!(
                "auth.jwt.secret must be at least {MIN_PRODUCTION_SECRET_LENGTH} bytes in {}",
                self.app.environment
            )));
        }

        Ok(())
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Environment variables: ACCOUNTS__SERVER__PORT=8080
/// 2. config/local.toml (git-ignored, developer overrides)
/// 3. config/{APP_ENV}.toml (development/test/production)
/// 4. config/default.toml (base defaults)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use ::config::{Config, Environment, File};

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_environment());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .set_default("app.environment", env.as_str())?
        .add_source(
            Environment::with_prefix("ACCOUNTS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate()?;

    tracing::debug!(environment = %app_config.app.environment, "Configuration loaded");

    Ok(app_config)
}
