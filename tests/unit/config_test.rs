//! Configuration loading against the repository's config/ directory
//!
//! Every test touches process environment variables, so all of them run
//! under `#[serial]` and reset the environment first.

use std::env;

use accounts::config::*;
use serial_test::serial;

mod utils {
    /// Remove every ACCOUNTS* variable and APP_ENV
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("ACCOUNTS"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }

        unsafe { std::env::remove_var("APP_ENV") };
    }
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
#[serial]
fn test_load_development_config() {
    utils::clean_env_vars();

    let config = load();
    assert!(config.is_ok(), "Failed to load configuration: {:?}", config.err());

    let config = config.unwrap();

    assert_eq!(config.app.name, "accounts");
    assert_eq!(config.app.environment, "development");
    assert_eq!(config.app.shutdown_timeout, 30);

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert!(config.server.workers > 0);

    assert!(config.database.url.starts_with("sqlite"));
    assert!(config.database.auto_migrate);

    assert_eq!(config.observability.log_format, LogFormat::Pretty);

    assert_eq!(config.auth.token_expiration, 604_800);
    assert_eq!(config.auth.argon2.memory_cost, 65536);
    assert_eq!(config.auth.jwt.algorithm, JwtAlgorithm::HS256);
    assert_eq!(config.auth.jwt.issuer, "accounts");
    assert!(!config.auth.jwt.secret.is_empty());

    assert_eq!(config.avatar.max_size, 1_000_000);
    assert_eq!(config.avatar.allowed_extensions, vec!["jpg", "jpeg", "png"]);

    assert!(config.api.swagger_enabled);
    assert_eq!(config.api.swagger_path, "/docs");

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_load_test_environment() {
    utils::clean_env_vars();
    unsafe { env::set_var("APP_ENV", "test") };

    let config = load().unwrap();

    assert_eq!(config.app.environment, "test");
    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(config.database.max_connections, 1);
    assert_eq!(config.auth.argon2.time_cost, 1);
    // Keys test.toml does not set fall through to default.toml
    assert_eq!(config.auth.argon2.hash_length, 32);
    assert_eq!(config.auth.jwt.secret, "accounts-test-secret");

    utils::clean_env_vars();
}

// =============================================================================
// Environment variable overrides
// =============================================================================

#[test]
#[serial]
fn test_environment_variable_override() {
    utils::clean_env_vars();

    unsafe {
        env::set_var("ACCOUNTS__SERVER__PORT", "9999");
        env::set_var("ACCOUNTS__APP__NAME", "custom-accounts");
        env::set_var("ACCOUNTS__AUTH__TOKEN_EXPIRATION", "7200");
        env::set_var("ACCOUNTS__AVATAR__MAX_SIZE", "2048");
    }

    let config = load().unwrap();

    assert_eq!(config.server.port, 9999);
    assert_eq!(config.app.name, "custom-accounts");
    assert_eq!(config.auth.token_expiration, 7200);
    assert_eq!(config.avatar.max_size, 2048);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_environment_variable_beats_environment_file() {
    utils::clean_env_vars();

    unsafe {
        env::set_var("APP_ENV", "test");
        env::set_var("ACCOUNTS__AUTH__JWT__SECRET", "from-the-environment");
        env::set_var("ACCOUNTS__AUTH__JWT__ALGORITHM", "HS512");
    }

    let config = load().unwrap();

    assert_eq!(config.auth.jwt.secret, "from-the-environment");
    assert_eq!(config.auth.jwt.algorithm, JwtAlgorithm::HS512);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_log_format_override() {
    utils::clean_env_vars();
    unsafe { env::set_var("ACCOUNTS__OBSERVABILITY__LOG_FORMAT", "json") };

    let config = load().unwrap();

    assert_eq!(config.observability.log_format, LogFormat::Json);

    utils::clean_env_vars();
}

// =============================================================================
// Validation
// =============================================================================

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    utils::clean_env_vars();
    unsafe { env::set_var("ACCOUNTS__SERVER__PORT", "0") };

    let result = load();

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_unparseable_value_is_a_load_error() {
    utils::clean_env_vars();
    unsafe { env::set_var("ACCOUNTS__SERVER__PORT", "not-a-port") };

    let result = load();

    assert!(matches!(result, Err(ConfigError::Load(_))));

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_production_requires_long_secret() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("APP_ENV", "production");
        env::set_var("ACCOUNTS__AUTH__JWT__SECRET", "too-short");
    }

    let result = load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    unsafe {
        env::set_var(
            "ACCOUNTS__AUTH__JWT__SECRET",
            "x".repeat(app::MIN_PRODUCTION_SECRET_LENGTH),
        );
    }

    let config = load().unwrap();
    assert_eq!(config.app.environment, "production");
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(!config.api.swagger_enabled);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_production_without_secret_fails() {
    utils::clean_env_vars();
    unsafe { env::set_var("APP_ENV", "production") };

    assert!(load().is_err());

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_zero_token_expiration_is_rejected() {
    utils::clean_env_vars();
    unsafe { env::set_var("ACCOUNTS__AUTH__TOKEN_EXPIRATION", "0") };

    assert!(matches!(load(), Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_min_connections_above_max_is_rejected() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("ACCOUNTS__DATABASE__MAX_CONNECTIONS", "2");
        env::set_var("ACCOUNTS__DATABASE__MIN_CONNECTIONS", "5");
    }

    assert!(matches!(load(), Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
}
