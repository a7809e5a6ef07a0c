//! Inventory Service Main Application
//!
//! Entry point for the durian supply-chain inventory transaction
//! engine's HTTP server. Asynchronous event publication (outbox/NATS)
//! is explicitly out of scope (§1) and is not wired up here.

use std::net::SocketAddr;

use inventory_service_api::create_router;
use shared_config::Config;
use shared_db::init_pool;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = init_pool(&config.database_url, config.max_connections.unwrap_or(10)).await?;

    let app = create_router(pool, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("inventory service listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
