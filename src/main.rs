use std::time::Duration;

use accounts::config::{self, AppConfig};
use accounts::metrics::{AppMetrics, MetricsMiddleware};
use accounts::security::{PasswordHasher, TokenIssuer};
use accounts::{observability, router};
use accounts_migration::{Migrator, MigratorTrait};
use actix_web::middleware::{Condition, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;

    observability::init(&config.observability);

    ::tracing::info!(
        name = %config.app.name,
        version = %config.app.version,
        environment = %config.app.environment,
        "Starting"
    );

    let db = connect(&config).await?;

    if config.database.auto_migrate {
        Migrator::up(&db, None)
            .await
            .context("Failed to run migrations")?;
    }

    let hasher = PasswordHasher::from_config(&config.auth.argon2)
        .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {e}"))?;
    let issuer = TokenIssuer::from_config(&config.auth);
    let metrics = AppMetrics::with_config(Some(&config));

    let db = Data::new(db);
    let hasher = Data::new(hasher);
    let issuer = Data::new(issuer);
    let avatar = Data::new(config.avatar.clone());
    let app_config = Data::new(config.clone());
    let app_metrics = Data::new(metrics.clone());
    let metrics_enabled = config.metrics.enabled;
    let api = config.api.clone();

    let address = config.server.address();
    ::tracing::info!(host = %address.0, port = address.1, workers = config.server.workers, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(
                metrics_enabled,
                MetricsMiddleware::new(metrics.clone()),
            ))
            .wrap(Logger::default())
            .app_data(db.clone())
            .app_data(hasher.clone())
            .app_data(issuer.clone())
            .app_data(avatar.clone())
            .app_data(app_config.clone())
            .app_data(app_metrics.clone())
            .configure(router::route)
            .configure(router::docs(&api))
    })
    .workers(config.server.workers)
    .shutdown_timeout(config.app.shutdown_timeout)
    .bind(address)?
    .run()
    .await?;

    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database.url.clone());

    options
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(Duration::from_secs(config.database.connect_timeout))
        .sqlx_logging(config.database.log_queries);

    Database::connect(options)
        .await
        .context("Failed to connect to database")
}
