//! Category-aware news aggregation over a fixed set of Korean RSS/Atom feeds.
//!
//! Feeds are fetched concurrently, normalized into [`domain::Article`]s,
//! deduplicated, keyword-filtered and ranked. Per-feed results and final
//! result sets are cached in memory, and failing feeds are put on cooldown.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod sources;
pub mod storage;

use std::net::SocketAddr;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::errors::AggregatorResult;
use crate::services::AggregateService;

pub async fn run_server(config: Config, addr: SocketAddr) -> AggregatorResult<()> {
    let aggregator = AggregateService::from_config(&config)?;
    let app = create_router(AppState::new(aggregator));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
