use anyhow::{Context, Result};
use tracing::{info, warn};

use hotel_settings_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::load().context("Failed to load configuration")?;

    middleware::logging::init_logging(&config.logging)
        .context("Failed to initialize logging")?;
    middleware::init_metrics().context("Failed to install metrics recorder")?;

    info!("Starting hotel settings API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database.pool_config())
        .await
        .context("Failed to connect to database")?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations completed");

    let settings = app::postgres_settings_store(&pool);
    if config.settings.seed_defaults {
        match settings.initialize_defaults().await {
            Ok(inserted) => info!(inserted = inserted, "Default settings seeded"),
            Err(e) => warn!(error = %e, "Failed to seed default settings"),
        }
    }

    let addr = config.socket_addr().context("Invalid server address")?;
    let app = app::create_app_with_store(config, pool, settings);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
