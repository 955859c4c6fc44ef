//! Algoviz server binary
//!
//! Serves the algorithm catalog and playback API.

use algoviz_server::{AlgovizServer, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoviz_server=info,algoviz_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Algoviz server");

    let config = ServerConfig::from_env()?;
    let state = AppState::seeded(config)?;
    tracing::info!(algorithms = state.store().list().len(), "catalog loaded");

    AlgovizServer::new(state).serve().await?;

    Ok(())
}
