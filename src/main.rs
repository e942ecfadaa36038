use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

mod collector;
mod config;
mod errors;
mod kubernetes;
mod metrics;
mod parsing;
mod publisher;
mod scheduler;
mod server;
mod types;

use config::load_config;
use kubernetes::create_client;
use publisher::SnapshotPublisher;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!(
        "listen = {}, metrics path = {}, poll interval = {:?}",
        cfg.listen_address, cfg.metrics_path, cfg.poll_interval
    );

    let client = create_client(cfg.in_cluster).await?;
    let publisher = Arc::new(SnapshotPublisher::new());

    // Background producer; the HTTP handlers below only ever read
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(scheduler::run(
        client,
        cfg.clone(),
        publisher.clone(),
        shutdown_rx,
    ));

    let app = server::router(publisher, &cfg.metrics_path);
    server::serve(cfg.listen_address, app, shutdown_signal()).await?;

    let _ = shutdown_tx.send(true);
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
