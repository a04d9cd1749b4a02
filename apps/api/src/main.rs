mod config;
mod encoding;
mod errors;
mod models;
mod pitch;
mod routes;
mod sample;
mod state;
mod table;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AutoPitch v{}", env!("CARGO_PKG_VERSION"));

    if config.openai_api_key.is_some() {
        info!("OPENAI_API_KEY is set but unused: pitches come from a fixed template");
    }

    if config.sample_csv_path.exists() {
        info!("Sample data: {}", config.sample_csv_path.display());
    } else {
        warn!(
            "Sample data not found at {}; the sample view will be empty",
            config.sample_csv_path.display()
        );
    }

    let state = AppState::new(config.clone());

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
