use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::Snapshot;

/// Owns the snapshot currently served to scrapers.
///
/// The poll cycle builds each snapshot entirely off to the side and swaps
/// it in with `publish`; the write guard is held only for the pointer
/// assignment. Scrapers capture an `Arc` once and read it unsynchronized,
/// so a scrape in progress always completes against the snapshot that was
/// current when it started.
#[derive(Debug)]
pub struct SnapshotPublisher {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// The most recently published snapshot. Before the first cycle
    /// completes this is the empty snapshot.
    pub async fn current(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Atomically replace the served snapshot.
    pub async fn publish(&self, snapshot: Snapshot) {
        let mut slot = self.current.write().await;
        *slot = Arc::new(snapshot);
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}
