//! ARM Mock Server
//!
//! Serves the mock ARM endpoints with resources loaded from a fixtures file.
//!
//! Environment Variables:
//! - FIXTURES: path to a JSON fixtures file (see `arm_mock_server::Fixtures`)
//! - PORT: Port to listen on (default: 1234)

use anyhow::{Context, Result};
use arm_mock_server::{router, ArmStore, Fixtures};
use std::env;
use std::net::SocketAddr;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let port = env::var("PORT")
        .unwrap_or_else(|_| "1234".to_string())
        .parse::<u16>()
        .context("PORT must be a valid u16")?;

    let store = ArmStore::new();
    match env::var("FIXTURES") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read fixtures from {path}"))?;
            let fixtures: Fixtures = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse fixtures in {path}"))?;
            info!(
                "Loaded {} managed application(s) and {} cluster(s) for subscription {}",
                fixtures.applications.len(),
                fixtures.clusters.len(),
                fixtures.subscription_id
            );
            store.load(&fixtures).await;
        }
        Err(_) => warn!("FIXTURES not set, serving an empty subscription"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("✅ ARM mock server ready at http://{}", addr);
    axum::serve(listener, router(store))
        .await
        .context("ARM mock server failed")?;
    Ok(())
}
