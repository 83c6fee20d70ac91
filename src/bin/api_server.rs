// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the blueprint scorer
// Usage: cargo run --features api --bin api_server

use blueprint_scorer::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "blueprint_scorer=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables (LOOKUP_POLICY, CATALOG_PATH, PORT)
    let config = ServerConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  LOOKUP_POLICY: {}", config.scorer.lookup_policy);
    tracing::info!(
        "  CATALOG_PATH: {}",
        config
            .scorer
            .catalog_path
            .as_ref()
            .map_or_else(|| "<embedded>".to_string(), |p| p.display().to_string())
    );
    tracing::info!("  PORT: {}", config.port);

    let state = AppState::new(config.scorer)?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
