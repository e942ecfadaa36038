use std::sync::Arc;

use kube::Client;
use tokio::sync::watch;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{error, info};

use crate::collector::ConstraintCollector;
use crate::errors::CycleError;
use crate::metrics::synthesize;
use crate::publisher::SnapshotPublisher;
use crate::types::Config;

/// Run one full poll cycle: discover, fetch, parse, synthesize, publish.
/// Returns the number of samples in the published snapshot.
pub async fn run_cycle(
    client: &Client,
    publisher: &SnapshotPublisher,
) -> Result<usize, CycleError> {
    let collector = ConstraintCollector::new(client);
    let constraints = collector.collect().await?;
    let snapshot = synthesize(&constraints);
    let sample_count = snapshot.len();
    publisher.publish(snapshot).await;
    Ok(sample_count)
}

/// Drive the poll cycle on a fixed period until shutdown.
///
/// A failed or timed out cycle leaves the previous snapshot in place and
/// retries from scratch on the next tick; trying again is the only
/// resilience mechanism.
pub async fn run(
    client: Client,
    cfg: Config,
    publisher: Arc<SnapshotPublisher>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(cfg.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match timeout(cfg.cycle_timeout, run_cycle(&client, &publisher)).await {
                    Ok(Ok(samples)) => info!("Published snapshot with {} samples", samples),
                    Ok(Err(err)) => error!("Poll cycle failed, keeping previous snapshot: {}", err),
                    Err(_) => error!(
                        "Poll cycle failed, keeping previous snapshot: {}",
                        CycleError::Timeout(cfg.cycle_timeout)
                    ),
                }
            }
            _ = shutdown.changed() => {
                info!("Scheduler stopping");
                return;
            }
        }
    }
}
