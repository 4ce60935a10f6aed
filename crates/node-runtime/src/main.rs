//! # FlightSurety Node Runtime
//!
//! The main entry point for the FlightSurety node.
//!
//! ## Event Flow
//!
//! ```text
//! fetch_flight_status ──→ OracleRequest ──→ OracleCoordinator
//!                                                │ (one task per matching oracle)
//!                                                ↓
//!                                     submit_oracle_response
//!                                                │ (quorum)
//!                                                ↓
//!                         FlightStatusInfo / FlightDelayed / InsuredPassengerPayout
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from `FS_*` environment variables
//! 3. Build subsystems and apply genesis
//! 4. Start the coordinator on an oracle event subscription
//! 5. Register the local oracles
//! 6. Serve the HTTP trigger until Ctrl+C

use anyhow::{Context, Result};
use node_runtime::{NodeConfig, SubsystemContainer};
use shared_bus::{EventFilter, EventTopic};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env().context("failed to load configuration")?;
    let http_addr = config.http_addr();

    info!("===========================================");
    info!("  FlightSurety Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("  Network: {}", config.network.name);
    info!("  Ledger:  {}", config.network.ledger_label());
    info!("===========================================");

    let container = SubsystemContainer::build(config)
        .await
        .context("failed to build subsystems")?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // Coordinator loop
    let subscription = container
        .ledger
        .subscribe(EventFilter::topics(vec![EventTopic::Oracles]));
    let coordinator = container.coordinator.clone();
    let mut coordinator_shutdown = shutdown_rx.clone();
    let coordinator_task = tokio::spawn(async move {
        tokio::select! {
            _ = coordinator.run(subscription) => {}
            _ = coordinator_shutdown.changed() => {
                info!("[fs-05] Shutdown signal received");
            }
        }
    });

    // Oracle self-registration, like hitting /api/oracles/register
    let registrar = container.coordinator.clone();
    tokio::spawn(async move {
        registrar.register_oracles().await;
    });

    // HTTP trigger
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;
    info!(addr = %http_addr, "HTTP trigger listening");

    let router = fs_05_oracle_coordinator::router(container.coordinator.clone());
    let mut http_shutdown = shutdown_rx.clone();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        let _ = http_shutdown.changed().await;
    });
    let server_task = tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("HTTP server error: {}", e);
        }
    });

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("Initiating graceful shutdown...");
    if let Err(e) = shutdown_tx.send(true) {
        error!("Failed to send shutdown signal: {}", e);
    }
    for task in [coordinator_task, server_task] {
        if let Err(e) = task.await {
            error!("Task ended abnormally: {}", e);
        }
    }
    info!("Shutdown complete");

    Ok(())
}
