//! Flock Server — application entry point.

use flock_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the variables.
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flock=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    tracing::info!("Starting flock server...");

    let db_config = DbConfig::from_env();
    let db = match DbManager::connect(&db_config).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(error = %err, "Could not connect to SurrealDB");
            std::process::exit(1);
        }
    };

    tracing::info!("Database ready, waiting for shutdown signal");

    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    drop(db);
    tracing::info!("flock server stopped.");
}
