//! pairbot server binary.
//!
//! Loads configuration from the environment, wires the upstream adapters
//! selected by `upstream.mode`, and serves the chat gateway until Ctrl-C.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use pairbot::adapters::http::{gateway_router, GatewayAppState};
use pairbot::adapters::storage::{InMemorySessionStore, SessionSweeper};
use pairbot::adapters::upstream::{
    HttpPairingClient, HttpProfileClient, InMemoryPairingClient, InMemoryProfileClient,
};
use pairbot::application::DialogueEngine;
use pairbot::config::{AppConfig, ServerConfig, UpstreamMode};
use pairbot::ports::{PairingClient, ProfileClient, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let (profiles, pairing) = upstream_clients(&config)?;
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let engine = Arc::new(
        DialogueEngine::new(profiles, pairing, sessions.clone())
            .with_budgets(config.dialogue.budgets()),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = config.dialogue.sweeper().map(|sweeper_config| {
        let sweeper = SessionSweeper::new(sessions.clone(), sweeper_config);
        tokio::spawn(async move { sweeper.run(shutdown_rx).await })
    });

    let state = GatewayAppState::new(engine, config.dialogue.max_photo_bytes);
    let app = gateway_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, mode = ?config.upstream.mode, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tx.send(true).ok();
    if let Some(handle) = sweeper {
        handle.await.ok();
    }
    tracing::info!("Gateway stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

fn upstream_clients(
    config: &AppConfig,
) -> Result<(Arc<dyn ProfileClient>, Arc<dyn PairingClient>), Box<dyn Error + Send + Sync>> {
    match config.upstream.mode {
        UpstreamMode::Http => {
            let profiles: Arc<dyn ProfileClient> =
                Arc::new(HttpProfileClient::new(config.upstream.profile_service())?);
            let pairing: Arc<dyn PairingClient> =
                Arc::new(HttpPairingClient::new(config.upstream.pairing_service())?);
            Ok((profiles, pairing))
        }
        UpstreamMode::InMemory => {
            tracing::warn!("Using in-memory upstream services; data is lost on restart");
            let store = Arc::new(InMemoryProfileClient::new());
            let pairing: Arc<dyn PairingClient> =
                Arc::new(InMemoryPairingClient::new(store.clone()));
            let profiles: Arc<dyn ProfileClient> = store;
            Ok((profiles, pairing))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
