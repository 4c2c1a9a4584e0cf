//! qdice server binary entry point.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qdice_server::{AppState, Cli, ServerConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from(&cli);
    let bind_addr = config.bind_address;

    let state = Arc::new(AppState::new(config));
    tracing::info!(
        backend = state.engine.backend().name(),
        gate_set = ?state.config.gate_set,
        optimization_level = state.engine.optimization_level(),
        "Initialized measurement engine"
    );

    let app = create_router(state);

    tracing::info!("Starting qdice server at http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
