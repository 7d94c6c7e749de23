//! Tribunal Server — Application entry point.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tribunal_server::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tribunal=info,tower_http=info")),
        )
        .json()
        .init();

    let config = ServerConfig::parse();
    info!("Starting tribunal server...");

    let db = tribunal_db::DbManager::connect(&config.db_config()).await?;
    tribunal_db::run_migrations(db.client()).await?;

    if config.seed_demo {
        let seeded = tribunal_db::seed_demo(db.client()).await?;
        info!(
            citizens = seeded.citizens,
            vehicles = seeded.vehicles,
            causes = seeded.causes,
            "demo data loaded"
        );
    }

    let state = AppState::new(db.client().clone(), config.auth_config())?;
    state.auth.purge_expired().await?;

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Tribunal server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
