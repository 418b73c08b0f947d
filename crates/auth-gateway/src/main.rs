//! Gateway binary: configuration, tracing, and the axum server loop.

use auth_gateway::{app, AppState, GatewayConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "auth_gateway=debug,auth_guard=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;
    let port = config.port;
    let state = AppState::new(config.auth);

    // Background eviction of lapsed replay records
    state.replay_store.spawn_sweeper(auth_guard::DEFAULT_SWEEP_INTERVAL);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "auth gateway listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
