use std::time::Duration;

use accounts_migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::{AppConfig, Argon2Config};
use crate::entities::v1::users;
use crate::security::{PasswordHasher, TokenIssuer, Validator};

/// Secret every test token is signed with
pub const JWT_SECRET: &str = "accounts-test-secret";

pub const USER_ONE_NAME: &str = "User One";
pub const USER_ONE_EMAIL: &str = "userOne@example.pl";
pub const USER_ONE_PASSWORD: &str = "123Test!";

/// Returns an in-memory SQLite database with all migrations applied
///
/// Every call creates a separate database, so tests never see each other's
/// rows. The pool is pinned to a single connection because each SQLite
/// in-memory connection is its own database.
///
/// # Panics
/// Panics if the connection or a migration fails.
pub async fn database() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");

    options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(60 * 60))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");

    accounts_migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Test configuration: `test` environment, fixed JWT secret and cheap
/// Argon2 parameters (19 MB, one pass, one lane)
pub fn config() -> AppConfig {
    let mut config = AppConfig::default();

    config.app.environment = "test".to_string();
    config.auth.jwt.secret = JWT_SECRET.to_string();
    config.auth.argon2 = Argon2Config {
        memory_cost: 19456,
        time_cost: 1,
        parallelism: 1,
        hash_length: 32,
    };

    config
}

/// # Panics
/// Panics if the Argon2 parameters in `config` are invalid.
pub fn password_hasher(config: &AppConfig) -> PasswordHasher {
    PasswordHasher::from_config(&config.auth.argon2).expect("Failed to build password hasher")
}

pub fn token_issuer(config: &AppConfig) -> TokenIssuer {
    TokenIssuer::from_config(&config.auth)
}

/// The user present before every test, with one session already open
#[derive(Clone, Debug)]
pub struct UserOne {
    pub user: users::Model,
    pub token: String,
}

impl UserOne {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

/// Insert `User One` with a single pre-issued token
///
/// # Panics
/// Panics if hashing, signing or any insert fails.
pub async fn user_one(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    issuer: &TokenIssuer,
) -> UserOne {
    let password = hasher
        .hash(USER_ONE_PASSWORD)
        .expect("Failed to hash password");

    let user = users::Model::new(
        USER_ONE_NAME.to_string(),
        Validator::normalize_email(USER_ONE_EMAIL),
        password,
    )
    .store(db)
    .await
    .expect("Failed to store user one");

    let token = issuer.issue(user.id).expect("Failed to sign token");
    user.append_token(db, token.clone())
        .await
        .expect("Failed to store token");

    UserOne { user, token }
}
